//! Output sinks: raw-line capture and terminal presentation.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use livecast_core::error::{LivecastError, Result};

/// Where captured raw lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    Disabled,
    Stdout,
    Stderr,
    File(PathBuf),
}

impl CaptureTarget {
    /// `stdout`/`-` and `stderr` are keywords (case-insensitive); anything
    /// else is a file path. Absent means capture off.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Disabled,
            Some(s) if s.eq_ignore_ascii_case("stdout") || s == "-" => Self::Stdout,
            Some(s) if s.eq_ignore_ascii_case("stderr") => Self::Stderr,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

/// Timestamped raw-line capture, opened on session initialize and closed on
/// terminate.
pub struct CaptureSink {
    target: CaptureTarget,
    writer: Option<Box<dyn Write + Send>>,
}

impl CaptureSink {
    pub fn new(target: CaptureTarget) -> Self {
        Self {
            target,
            writer: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(CaptureTarget::Disabled)
    }

    pub fn open(&mut self) -> Result<()> {
        self.writer = match &self.target {
            CaptureTarget::Disabled => None,
            CaptureTarget::Stdout => Some(Box::new(io::stdout()) as Box<dyn Write + Send>),
            CaptureTarget::Stderr => Some(Box::new(io::stderr())),
            CaptureTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        LivecastError::Sink(format!("open {} failed: {e}", path.display()))
                    })?;
                Some(Box::new(file))
            }
        };
        Ok(())
    }

    /// Write one timestamped line; write failures are logged, not fatal.
    pub fn record(&mut self, line: &str) {
        if let Some(writer) = &mut self.writer {
            let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
            if let Err(e) = writeln!(writer, "{stamp}\t{line}") {
                tracing::warn!(error = %e, "capture write failed");
            }
        }
    }

    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| LivecastError::Sink(format!("flush failed: {e}")))?;
        }
        Ok(())
    }
}

/// The two presentation streams hooks write to.
///
/// Production uses the process stdio; tests swap in buffers.
pub struct TermSink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl TermSink {
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self { out, err }
    }

    pub fn out_line(&mut self, line: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "stdout write failed");
        }
    }

    pub fn err_line(&mut self, line: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.err, "{line}") {
            tracing::warn!(error = %e, "stderr write failed");
        }
    }
}
