//! Machine-readable output.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

use super::{Report, ReportSink};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a Report,
}

/// Writes the report as one pretty-printed JSON document.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn render(&mut self, report: &Report) -> Result<()> {
        let document = JsonReport {
            generated_at: Utc::now(),
            report,
        };
        serde_json::to_writer_pretty(&mut self.out, &document)
            .context("Failed to serialize report")?;
        writeln!(self.out)?;
        self.out.flush().context("Failed to flush report output")?;
        Ok(())
    }
}
