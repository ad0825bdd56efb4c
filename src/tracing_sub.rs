use std::io::{self, Write};

use tracing::Level;

use crate::components::debug_log::{DebugLogWriter, global_debug_log};

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    Debug(DebugLogWriter),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new() -> Self {
        let inner = match global_debug_log() {
            Some(handle) => DelegatingInner::Debug(handle.writer()),
            None => DelegatingInner::Stderr(io::stderr()),
        };
        Self { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::Debug(w) => w.write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::Debug(w) => w.flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

impl Drop for DelegatingWriter {
    fn drop(&mut self) {
        let _ = self.flush();
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

/// Install the global subscriber. Output goes to the debug log buffer once
/// one is registered, stderr before that. Later calls are no-ops.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
}
