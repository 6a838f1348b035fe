//! Comment sources.
//!
//! A [`CommentSource`] yields the raw comments of one post. Network scraping
//! and authentication live outside this crate; the sources here read comments
//! that were already exported, either from a single file or from an archive
//! directory keyed by post shortcode.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Path segments that precede the shortcode in post URLs.
const POST_KINDS: [&str; 4] = ["p", "reel", "reels", "tv"];

/// Errors raised while locating or reading comments.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The post URL has no usable shortcode.
    #[error("invalid post url {url:?}: {reason}")]
    InvalidPostUrl {
        /// Input as given.
        url: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// No exported comments exist for the post.
    #[error("no comments archived for post {shortcode} under {}", root.display())]
    NotFound {
        /// Post shortcode.
        shortcode: String,
        /// Archive directory searched.
        root: PathBuf,
    },
    /// Reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A JSON export could not be parsed.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A JSON export is not an array of comments.
    #[error("expected a JSON array of comments in {}", path.display())]
    NotAnArray {
        /// File being read.
        path: PathBuf,
    },
    /// A JSON entry is neither a string nor an object with a `text` string.
    #[error("comment {index} is malformed: expected a string, found {found}")]
    MalformedComment {
        /// Zero-based entry index.
        index: usize,
        /// JSON kind that was found.
        found: &'static str,
    },
}

/// Identifies a post by its shortcode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostRef {
    shortcode: String,
}

impl PostRef {
    /// Extracts the shortcode from a post URL or accepts a bare shortcode.
    ///
    /// The shortcode is the segment after `/p/`, `/reel/`, `/reels/` or
    /// `/tv/`; failing that, the last path segment. Query strings, fragments
    /// and trailing slashes are ignored.
    ///
    /// ```
    /// use murmur_core::source::PostRef;
    ///
    /// let post = PostRef::parse("https://www.instagram.com/p/CxYz_12-a/?igsh=abc").unwrap();
    /// assert_eq!(post.shortcode(), "CxYz_12-a");
    /// ```
    pub fn parse(url: &str) -> Result<Self, SourceError> {
        let invalid = |reason| SourceError::InvalidPostUrl {
            url: url.to_owned(),
            reason,
        };

        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty input"));
        }

        let without_suffix = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let (has_host, path) = match without_suffix.split_once("://") {
            Some((_, rest)) => (true, rest),
            None => (without_suffix.contains('/'), without_suffix),
        };

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if has_host && !segments.is_empty() {
            segments.remove(0);
        }

        let candidate = segments
            .windows(2)
            .find(|w| POST_KINDS.contains(&w[0]))
            .map(|w| w[1])
            .or_else(|| segments.last().copied())
            .ok_or_else(|| invalid("no path segment"))?;

        if !candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid("shortcode has unexpected characters"));
        }

        Ok(Self {
            shortcode: candidate.to_owned(),
        })
    }

    /// Wraps an already known shortcode.
    pub fn from_shortcode(shortcode: impl Into<String>) -> Self {
        Self {
            shortcode: shortcode.into(),
        }
    }

    /// The post shortcode.
    pub fn shortcode(&self) -> &str {
        &self.shortcode
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shortcode)
    }
}

/// Supplies the raw comments of a post, in display order.
pub trait CommentSource {
    /// Fetches every comment of `post`.
    fn fetch(&self, post: &PostRef) -> Result<Vec<String>, SourceError>;
}

/// Fixed in-memory comments, returned for any post.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    comments: Vec<String>,
}

impl MemorySource {
    /// Creates a source over `comments`.
    pub fn new<I, S>(comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            comments: comments.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommentSource for MemorySource {
    fn fetch(&self, _post: &PostRef) -> Result<Vec<String>, SourceError> {
        Ok(self.comments.clone())
    }
}

/// Reads one export file regardless of the post asked for.
///
/// `.json` files hold an array whose entries are strings or objects with a
/// `text` string. Any other file holds one comment per non-blank line, so a
/// comment spanning several lines needs the `.json` form.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommentSource for FileSource {
    fn fetch(&self, post: &PostRef) -> Result<Vec<String>, SourceError> {
        debug!(post = %post, path = %self.path.display(), "reading comment export");
        read_comments(&self.path)
    }
}

/// Reads `<root>/<shortcode>.json`, falling back to `<root>/<shortcode>.txt`.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    root: PathBuf,
}

impl ArchiveSource {
    /// Creates a source over the archive directory `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CommentSource for ArchiveSource {
    fn fetch(&self, post: &PostRef) -> Result<Vec<String>, SourceError> {
        for ext in ["json", "txt"] {
            let path = self.root.join(format!("{}.{ext}", post.shortcode()));
            if path.is_file() {
                debug!(post = %post, path = %path.display(), "reading archived comments");
                return read_comments(&path);
            }
        }
        Err(SourceError::NotFound {
            shortcode: post.shortcode().to_owned(),
            root: self.root.clone(),
        })
    }
}

/// Reads comments from a `.json` export or a line-per-comment text file.
pub fn read_comments(path: &Path) -> Result<Vec<String>, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_comments(&text, path)
    } else {
        Ok(parse_line_comments(&text))
    }
}

fn parse_line_comments(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_json_comments(text: &str, path: &Path) -> Result<Vec<String>, SourceError> {
    let value: Value = serde_json::from_str(text).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(SourceError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s),
            Value::Object(mut obj) => match obj.remove("text") {
                Some(Value::String(s)) => Ok(s),
                Some(other) => Err(SourceError::MalformedComment {
                    index,
                    found: json_kind(&other),
                }),
                None => Err(SourceError::MalformedComment {
                    index,
                    found: "object without text",
                }),
            },
            other => Err(SourceError::MalformedComment {
                index,
                found: json_kind(&other),
            }),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
