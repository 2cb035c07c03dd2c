#![allow(dead_code)]
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use text_fitter::sink::{OutputSink, SinkError};
use text_fitter::Config;

/// Writes `content` to `name` inside `dir` and returns the full path
pub fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Default configuration for `path` with the given width and wrapper
pub fn config_for(path: &Path, max_chars: usize, wrapper: text_fitter::QuoteStyle) -> Config {
    let mut config = Config::new(path);
    config.max_chars = max_chars;
    config.wrapper = wrapper;
    config
}

/// Keeps every delivered text; clones share the same record.
#[derive(Clone, Default)]
pub struct RecordingSink {
    delivered: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.borrow().clone()
    }
}

impl OutputSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        self.delivered.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// A clipboard that is there but refuses every copy
pub struct FailingSink;

impl OutputSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn deliver(&mut self, _text: &str) -> Result<(), SinkError> {
        Err(SinkError::Clipboard("no display".to_string()))
    }
}

/// Shared byte buffer the test log subscriber writes into
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with warnings and errors logged into a buffer, then returns the buffer
pub fn capture_warnings(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
