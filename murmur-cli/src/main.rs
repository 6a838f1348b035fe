//! Murmur CLI
//!
//! Analyzes the comments of a social-media post from a local export.
//!
//! # Commands
//!
//! - `analyze`: clean, score and count a post's comments, then report
//! - `clean`: print the cleaned form of one text
//! - `score`: print the sentiment of one text
//!
//! # Exit codes
//!
//! - `0`: success, including a post with zero comments
//! - `1`: bad arguments or configuration
//! - `2`: the comments could not be fetched
//! - `3`: analysis stopped partway (`--abort-on-error`)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use murmur_core::{
    AnalysisConfig, ArchiveSource, CommentSource, FailurePolicy, FileSource, Pipeline, PostRef,
    RunError,
};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod render;

const EXIT_USAGE: u8 = 1;
const EXIT_FETCH: u8 = 2;
const EXIT_ANALYSIS: u8 = 3;

/// Sentiment and word-frequency analysis of post comments.
#[derive(Parser)]
#[command(name = "murmur")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every comment of a post
    Analyze(AnalyzeArgs),
    /// Print the cleaned form of a text
    Clean {
        /// Text to clean
        text: String,
    },
    /// Print the sentiment label and compound score of a text
    ///
    /// Scores the text as given, uncleaned. `analyze` scores cleaned text,
    /// so pass --clean to get the score a comment receives there.
    Score {
        /// Text to score
        text: String,
        /// Clean the text before scoring it
        #[arg(long)]
        clean: bool,
        /// Print all four polarity scores
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: Input,

    /// Post URL or shortcode
    #[arg(long, value_name = "URL")]
    post: Option<String>,

    /// Number of entries in the frequent-word table
    #[arg(long, value_name = "N")]
    top_k: Option<usize>,

    /// Stop-word list, one word per line
    #[arg(long, value_name = "FILE")]
    stop_words: Option<PathBuf>,

    /// Valence lexicon, `word<TAB>valence` per line
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Stop at the first comment the analyzer rejects
    #[arg(long)]
    abort_on_error: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Include the per-comment table in text output
    #[arg(long)]
    rows: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Input {
    /// Comment export: a JSON array or one comment per line
    #[arg(long, value_name = "FILE")]
    comments: Option<PathBuf>,

    /// Directory of per-post exports named after the shortcode
    #[arg(long, value_name = "DIR", requires = "post")]
    archive: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::Analyze(args) => analyze(config, args),
        Commands::Clean { text } => {
            let pipeline = Pipeline::from_config(&config)?;
            println!("{}", pipeline.clean(&text));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Score { text, clean, raw } => {
            let pipeline = Pipeline::from_config(&config)?;
            println!("{}", score_line(&pipeline, &text, clean, raw)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn score_line(pipeline: &Pipeline, text: &str, clean: bool, raw: bool) -> Result<String> {
    let cleaned;
    let text = if clean {
        cleaned = pipeline.clean(text);
        cleaned.as_str()
    } else {
        text
    };

    if raw {
        let scores = pipeline.scorer().polarity_scores(text)?;
        Ok(format!(
            "pos={:.3} neu={:.3} neg={:.3} compound={:.4}",
            scores.positive, scores.neutral, scores.negative, scores.compound
        ))
    } else {
        Ok(pipeline.score(text)?.to_string())
    }
}

fn analyze(mut config: AnalysisConfig, args: AnalyzeArgs) -> Result<ExitCode> {
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if args.stop_words.is_some() {
        config.stop_words = args.stop_words;
    }
    if args.lexicon.is_some() {
        config.lexicon = args.lexicon;
    }
    if args.abort_on_error {
        config.failure_policy = FailurePolicy::Abort;
    }
    config.validate()?;
    debug!(?config, "effective configuration");

    let pipeline = Pipeline::from_config(&config)?;

    let (source, post): (Box<dyn CommentSource>, PostRef) = match args.input {
        Input {
            comments: Some(path),
            ..
        } => {
            let post = match &args.post {
                Some(url) => PostRef::parse(url)?,
                None => PostRef::from_shortcode(
                    path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                ),
            };
            (Box::new(FileSource::new(path)), post)
        }
        Input {
            archive: Some(root),
            ..
        } => {
            let url = args.post.as_deref().context("--archive needs --post")?;
            (Box::new(ArchiveSource::new(root)), PostRef::parse(url)?)
        }
        Input { .. } => anyhow::bail!("one of --comments or --archive is required"),
    };

    let report = match pipeline.run(source.as_ref(), &post) {
        Ok(report) => report,
        Err(err @ RunError::Fetch(_)) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::from(EXIT_FETCH));
        }
        Err(RunError::Analysis(err)) => {
            eprintln!("error: analysis stopped: {err}");
            return Ok(ExitCode::from(EXIT_ANALYSIS));
        }
    };

    if report.is_empty() {
        eprintln!("post {post} has no comments");
    }

    let mut out = io::stdout().lock();
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Format::Text => render::text_report(&mut out, &report, args.rows)?,
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cleaned_score_matches_analyze() {
        let pipeline = Pipeline::default();
        let comment = "I love this!!";
        let row = &pipeline.analyze(&[comment]).unwrap().rows[0];

        let cleaned = score_line(&pipeline, comment, true, false).unwrap();
        assert_eq!(cleaned, pipeline.score(&row.cleaned).unwrap().to_string());

        let as_given = score_line(&pipeline, comment, false, false).unwrap();
        assert_ne!(as_given, cleaned);
    }

    #[test]
    fn raw_prints_all_scores() {
        let line = score_line(&Pipeline::default(), "love", false, true).unwrap();
        assert!(line.starts_with("pos="));
        assert!(line.ends_with("compound=0.6369"));
    }
}
