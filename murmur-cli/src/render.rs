//! Plain-text report rendering.

use std::io::{self, Write};

use murmur_core::AnalysisReport;
use murmur_types::{AnalysisRow, FrequencyTable, Sentiment, SentimentDistribution};

const BAR_WIDTH: usize = 40;
const CELL_WIDTH: usize = 40;

/// Writes the distribution chart, the top-word chart, the stats line and
/// optionally the per-comment table.
pub fn text_report<W: Write>(out: &mut W, report: &AnalysisReport, rows: bool) -> io::Result<()> {
    distribution(out, &report.distribution)?;
    writeln!(out)?;
    top_words(out, &report.frequencies)?;
    writeln!(out)?;
    writeln!(out, "Stats: {}", report.stats)?;

    if rows && !report.rows.is_empty() {
        writeln!(out)?;
        table(out, &report.rows)?;
    }
    Ok(())
}

fn distribution<W: Write>(out: &mut W, dist: &SentimentDistribution) -> io::Result<()> {
    let total = dist.total();
    writeln!(out, "Sentiment distribution ({total} comments)")?;

    let max = Sentiment::ALL.iter().map(|&s| dist.get(s)).max().unwrap_or(0);
    for label in Sentiment::ALL {
        let count = dist.get(label);
        let pct = if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        };
        writeln!(
            out,
            "  {:<8}  {:<BAR_WIDTH$}  {count} ({pct:.1}%)",
            label.as_str(),
            bar(count, max)
        )?;
    }
    Ok(())
}

fn top_words<W: Write>(out: &mut W, table: &FrequencyTable) -> io::Result<()> {
    writeln!(out, "Top words")?;
    if table.is_empty() {
        return writeln!(out, "  (none)");
    }

    let width = table.iter().map(|wc| wc.word.len()).max().unwrap_or(0);
    let max = table.max_count();
    for wc in table {
        writeln!(
            out,
            "  {:<width$}  {:<BAR_WIDTH$}  {}",
            wc.word,
            bar(wc.count, max),
            wc.count
        )?;
    }
    Ok(())
}

fn table<W: Write>(out: &mut W, rows: &[AnalysisRow]) -> io::Result<()> {
    let cells: Vec<(String, String)> = rows
        .iter()
        .map(|r| (cell(&r.original), cell(&r.cleaned)))
        .collect();
    let w_orig = column_width("Original Comment", cells.iter().map(|c| &c.0));
    let w_clean = column_width("Cleaned", cells.iter().map(|c| &c.1));

    writeln!(
        out,
        "{:<w_orig$} | {:<w_clean$} | {:<9} | {:>7}",
        "Original Comment", "Cleaned", "Sentiment", "Score"
    )?;
    writeln!(
        out,
        "{}-+-{}-+-{}-+-{}",
        "-".repeat(w_orig),
        "-".repeat(w_clean),
        "-".repeat(9),
        "-".repeat(7)
    )?;

    for (row, (original, cleaned)) in rows.iter().zip(&cells) {
        write!(
            out,
            "{original:<w_orig$} | {cleaned:<w_clean$} | {:<9} | {:>7.4}",
            row.sentiment.as_str(),
            row.score
        )?;
        if let Some(cause) = &row.failure {
            write!(out, "  ! {cause}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Bar of up to `BAR_WIDTH` cells; any nonzero count gets at least one.
fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(max))
}

/// Single-line cell text, truncated to `CELL_WIDTH` characters.
fn cell(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= CELL_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a String>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::Pipeline;
    use pretty_assertions::assert_eq;

    fn render(report: &AnalysisReport, rows: bool) -> String {
        let mut buf = Vec::new();
        text_report(&mut buf, report, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bars_scale_to_the_largest_count() {
        assert_eq!(bar(4, 4).len(), BAR_WIDTH);
        assert_eq!(bar(2, 4).len(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).len(), 1);
        assert_eq!(bar(0, 4), "");
        assert_eq!(bar(0, 0), "");
    }

    #[test]
    fn empty_report() {
        let text = render(&AnalysisReport::default(), true);
        assert!(text.starts_with("Sentiment distribution (0 comments)\n"));
        assert!(text.contains("  Positive  "));
        assert!(text.contains("0 (0.0%)"));
        assert!(text.contains("Top words\n  (none)\n"));
        assert!(text.contains("Stats: 0 comments, 0 tokens, 0 distinct"));
        assert!(!text.contains("Original Comment"));
    }

    #[test]
    fn full_report_with_rows() {
        let report = Pipeline::default()
            .analyze(&["I love this!!", "I hate this.", "meh"])
            .unwrap();
        let text = render(&report, true);

        assert!(text.contains("1 (33.3%)"));
        assert!(text.contains("Original Comment | Cleaned"));
        let love = text
            .lines()
            .find(|l| l.starts_with("I love this!!"))
            .unwrap();
        assert!(love.contains("| Positive  |"));
    }

    #[test]
    fn rows_hidden_without_flag() {
        let report = Pipeline::default().analyze(&["good song"]).unwrap();
        assert!(!render(&report, false).contains("Original Comment"));
    }

    #[test]
    fn cells_are_flattened_and_truncated() {
        assert_eq!(cell("a\nb"), "a b");
        let long = "x".repeat(100);
        let c = cell(&long);
        assert_eq!(c.chars().count(), CELL_WIDTH);
        assert!(c.ends_with("..."));
    }
}
