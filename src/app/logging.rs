//! Deferred logging for the terminal runner.
//!
//! Raw-mode output and log lines must not interleave, so events are buffered
//! in memory and written to stderr once the terminal is restored.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Drain everything logged so far.
    pub fn take(&self) -> Vec<u8> {
        match self.0.lock() {
            Ok(mut buf) => std::mem::take(&mut *buf),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn dump_to_stderr(&self) {
        let bytes = self.take();
        if !bytes.is_empty() {
            let _ = io::stderr().write_all(&bytes);
        }
    }
}

pub struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl Write for LogWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?;
        buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter(Arc::clone(&self.0))
    }
}

/// Install a buffered subscriber when `LUCK_ARCADE_LOG` names a filter.
pub fn init_from_env() -> Option<LogBuffer> {
    let filter = std::env::var("LUCK_ARCADE_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())?;
    let buffer = LogBuffer::default();
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(buffer.clone()),
        )
        .try_init()
        .ok()?;
    Some(buffer)
}
