use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppResult;
use crate::fitter::TextFitter;
use crate::io::read_input;
use crate::sink::{ConsoleSink, FileSink, OutputSink};

/// One run of the tool: read the input, fit it, hand it to every requested sink.
pub struct App {
    pub config: Config,
    console: Option<Box<dyn OutputSink>>,
    clipboard: Option<Box<dyn OutputSink>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let console = config
            .print
            .then(|| Box::new(ConsoleSink::stdout()) as Box<dyn OutputSink>);

        Self {
            config,
            console,
            clipboard: None,
        }
    }

    /// Replaces the console sink. Ignored when printing is turned off.
    pub fn with_console(mut self, console: Box<dyn OutputSink>) -> Self {
        if self.config.print {
            self.console = Some(console);
        }
        self
    }

    /// The clipboard, if one could be reached at startup.
    pub fn with_clipboard(mut self, clipboard: Option<Box<dyn OutputSink>>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Runs the whole pipeline and returns the fitted text.
    ///
    /// Unreadable input, an unusable width or a failed file write end the run.
    /// A missing or failing clipboard only logs a warning.
    pub fn run(&mut self) -> AppResult<String> {
        let text = read_input(&self.config.file_path)?;
        let fitter = TextFitter::new(self.config.fit_request(text))?;
        let fitted = fitter.fit();

        info!(
            lines = fitted.lines().count(),
            width = self.config.max_chars,
            "fitted {}",
            self.config.file_path.display()
        );

        if let Some(console) = self.console.as_mut() {
            console.deliver(&fitted)?;
        }

        if let Some(ref path) = self.config.output {
            FileSink::new(path).deliver(&fitted)?;
        }

        if self.config.clip {
            match self.clipboard.as_mut() {
                Some(clipboard) => {
                    if let Err(err) = clipboard.deliver(&fitted) {
                        warn!(%err, "could not copy to {}", clipboard.name());
                    }
                }
                None => warn!("clipboard support is unavailable, skipping copy"),
            }
        }

        Ok(fitted)
    }
}
