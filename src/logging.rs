use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

// The subscriber is installed before the alternate screen is entered, so
// stderr output would tear the UI. Logging is therefore a no-op sink unless
// the user opts into a log file.
static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(std::fs::File),
    Sink,
}

impl DelegatingWriter {
    fn new() -> Self {
        let path = LOG_FILE.lock().ok().and_then(|guard| guard.clone());
        let inner = match path {
            Some(path) => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(DelegatingInner::File)
                .unwrap_or(DelegatingInner::Sink),
            None => DelegatingInner::Sink,
        };
        Self { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.write(buf),
            DelegatingInner::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.flush(),
            DelegatingInner::Sink => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Initialize the tracing subscriber, appending to `log_file` when given.
/// Safe to call multiple times; subsequent calls are no-ops for the global
/// subscriber.
pub fn init(log_file: Option<PathBuf>) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = log_file;
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_writer_swallows_output() {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = None;
        }
        let mut writer = DelegatingWriter::new();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        writer.flush().unwrap();
    }
}
