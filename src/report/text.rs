//! Console tables for the ranked and distribution reports.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use super::{Report, ReportSink};

/// Width used when the terminal size cannot be detected.
pub const FALLBACK_WIDTH: usize = 120;

const RANKED_HEADERS: [&str; 2] = ["Assembly Name", "Times Projects Referenced This Assembly"];
const DISTRIBUTION_HEADERS: [&str; 2] = ["# of References", "Frequency"];
const COLUMN_GAP: &str = "  ";

/// Writes reports as plain-text tables with underlined headers.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    marker: char,
    /// Lines are cut at this many characters
    width: usize,
    /// Emit ANSI underline for headers
    styled: bool,
}

impl TextSink<io::Stdout> {
    /// Sink for the process's stdout, sized to the terminal.
    pub fn stdout(marker: char) -> Self {
        let stdout = io::stdout();
        let styled = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        let width = crossterm::terminal::size()
            .map(|(columns, _)| usize::from(columns))
            .ok()
            .filter(|&columns| columns > 0)
            .unwrap_or(FALLBACK_WIDTH);

        Self {
            out: stdout,
            marker,
            width,
            styled,
        }
    }
}

impl<W: Write> TextSink<W> {
    /// Unstyled sink over any writer.
    pub fn new(out: W, marker: char, width: usize) -> Self {
        Self {
            out,
            marker,
            width,
            styled: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, headers: [&'static str; 2], rows: &[[String; 2]]) -> Result<()> {
        let first_width = rows
            .iter()
            .map(|row| row[0].chars().count())
            .chain(std::iter::once(headers[0].chars().count()))
            .max()
            .unwrap_or_default();

        let header_line = if self.styled {
            format!(
                "{}{}{}{}",
                headers[0].underlined(),
                pad(headers[0], first_width),
                COLUMN_GAP,
                headers[1].underlined()
            )
        } else {
            format!(
                "{}{}{}{}",
                headers[0],
                pad(headers[0], first_width),
                COLUMN_GAP,
                headers[1]
            )
        };
        // Styled headers carry escape codes, so they are not cut to width.
        if self.styled {
            writeln!(self.out, "{header_line}")?;
        } else {
            self.write_line(&header_line)?;
        }

        for [first, second] in rows {
            let line = format!("{first}{}{COLUMN_GAP}{second}", pad(first, first_width));
            self.write_line(&line)?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let cut: String = line.chars().take(self.width).collect();
        writeln!(self.out, "{}", cut.trim_end())?;
        Ok(())
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn render(&mut self, report: &Report) -> Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Number of unique references: {}",
            report.unique_references
        )?;
        writeln!(self.out)?;

        if let Some(ranked) = &report.ranked {
            let rows: Vec<[String; 2]> = ranked
                .iter()
                .map(|row| [row.name.clone(), row.count.to_string()])
                .collect();
            self.write_table(RANKED_HEADERS, &rows)?;
            writeln!(self.out)?;
        }

        writeln!(self.out)?;
        let marker = self.marker;
        let rows: Vec<[String; 2]> = report
            .distribution
            .iter()
            .map(|row| [row.count.to_string(), row.bar(marker)])
            .collect();
        self.write_table(DISTRIBUTION_HEADERS, &rows)?;
        writeln!(self.out)?;

        self.out.flush().context("Failed to flush report output")?;
        Ok(())
    }
}

/// Format an elapsed time as `hh:mm:ss.ff`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hundredths = elapsed.subsec_millis() / 10;
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60,
        hundredths
    )
}

/// Spaces needed to widen `cell` to `width` characters.
fn pad(cell: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(cell.chars().count()))
}
