use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[cfg(feature = "clipboard")]
use clipboard::{ClipboardContext, ClipboardProvider};

const CONSOLE_HEADER: &str = "Fitted text:";

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Console output failed: {0}")]
    Console(#[source] io::Error),
    #[error("Failed to write {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Somewhere the fitted text can be delivered to.
pub trait OutputSink {
    fn name(&self) -> &str;
    fn deliver(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Prints a short header followed by the fitted text.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        write!(self.out, "{CONSOLE_HEADER}\n\n\n{text}\n").map_err(SinkError::Console)?;
        self.out.flush().map_err(SinkError::Console)
    }
}

/// Writes the fitted text, without a trailing newline, to a file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        fs::write(&self.path, text).map_err(|source| SinkError::File {
            path: self.path.display().to_string(),
            source,
        })?;
        info!(path = %self.path.display(), "saved fitted text");
        Ok(())
    }
}

/// The system clipboard.
#[cfg(feature = "clipboard")]
pub struct ClipboardSink {
    ctx: ClipboardContext,
}

#[cfg(feature = "clipboard")]
impl ClipboardSink {
    pub fn connect() -> Result<Self, SinkError> {
        let ctx = ClipboardContext::new().map_err(|e| SinkError::Clipboard(e.to_string()))?;
        Ok(Self { ctx })
    }
}

#[cfg(feature = "clipboard")]
impl OutputSink for ClipboardSink {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        self.ctx
            .set_contents(text.to_owned())
            .map_err(|e| SinkError::Clipboard(e.to_string()))?;
        info!("copied fitted text to clipboard");
        Ok(())
    }
}

/// Connects to the system clipboard, if this build and this session have one.
#[cfg(feature = "clipboard")]
pub fn system_clipboard() -> Option<Box<dyn OutputSink>> {
    match ClipboardSink::connect() {
        Ok(sink) => Some(Box::new(sink)),
        Err(err) => {
            tracing::debug!(%err, "could not connect to the clipboard");
            None
        }
    }
}

/// Built without clipboard support.
#[cfg(not(feature = "clipboard"))]
pub fn system_clipboard() -> Option<Box<dyn OutputSink>> {
    None
}
