//! Comment Analysis Benchmarking Tool
//!
//! Measures throughput of the analysis stages on a large comment export,
//! one comment per line (or a `.json` array).
//!
//! ## What It Benchmarks
//!
//! 1. **Clean**: URL/punctuation stripping, lowercasing, stop-word removal
//! 2. **Count**: cleaning plus token counting for the frequent-word table
//! 3. **Pipeline**: the full analysis (clean, score, count, tally)
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/comment_bench /path/to/comments.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Pipeline ===
//! --------------------------------
//! Mode        : Pipeline
//! Elapsed     : 0.212 s
//! Throughput  : 48.31 MiB/s
//! Comments/s  : 1_204_331
//! --------------------------------
//! ```
//!
//! Build with `--release`; debug builds also run the tokenizer's contract
//! assertions on every comment.

use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

use murmur_core::analyzer::Cleaner;
use murmur_core::frequency::WordCounter;
use murmur_core::source::read_comments;
use murmur_core::Pipeline;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: comment_bench <path>");
        std::process::exit(1);
    }

    println!("Loading comments...");
    let comments = read_comments(Path::new(&args[1]))?;
    let bytes: usize = comments.iter().map(String::len).sum();

    println!("Comments:  {}", fmt_count(comments.len() as u64));
    println!("Size:      {}\n", fmt_bytes(bytes as u64));

    bench_clean(&comments, bytes);
    bench_count(&comments, bytes);
    bench_pipeline(&comments, bytes);

    Ok(())
}

fn bench_clean(comments: &[String], bytes: usize) {
    let cleaner = Cleaner::english();
    let mut buf = String::new();

    println!("=== Clean ===");

    let mut run = || {
        for comment in comments {
            cleaner.clean_into(comment, &mut buf);
            std::hint::black_box(&buf);
        }
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Clean", bytes, comments.len(), elapsed);
}

fn bench_count(comments: &[String], bytes: usize) {
    let cleaner = Cleaner::english();
    let mut buf = String::new();

    println!("=== Count ===");

    let mut run = || {
        let mut counter = WordCounter::new();
        for comment in comments {
            cleaner.clean_into(comment, &mut buf);
            counter.add_cleaned(&buf);
        }
        std::hint::black_box(counter.top(10));
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Count", bytes, comments.len(), elapsed);
}

fn bench_pipeline(comments: &[String], bytes: usize) {
    let pipeline = Pipeline::default();

    println!("=== Pipeline ===");

    let mut run = || {
        let report = pipeline.analyze(comments);
        std::hint::black_box(report.is_ok());
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Pipeline", bytes, comments.len(), elapsed);
}

fn warmup<F: FnMut()>(f: &mut F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(f: &mut F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, comments: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    let mib = input_bytes as f64 / (1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.2} MiB/s", mib / secs);
    println!("Comments/s  : {}", fmt_count((comments as f64 / secs) as u64));
    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
