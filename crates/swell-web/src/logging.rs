//! Routing `tracing` output to the browser console.

use std::io;

/// Buffers one formatted event and hands it to a sink as a single line
/// when flushed or dropped.
pub struct LineWriter<F: FnMut(&str)> {
    buf: Vec<u8>,
    sink: F,
}

impl<F: FnMut(&str)> LineWriter<F> {
    pub fn new(sink: F) -> Self {
        Self {
            buf: Vec::new(),
            sink,
        }
    }
}

impl<F: FnMut(&str)> io::Write for LineWriter<F> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let text = String::from_utf8_lossy(&self.buf);
            (self.sink)(text.trim_end());
            self.buf.clear();
        }
        Ok(())
    }
}

impl<F: FnMut(&str)> Drop for LineWriter<F> {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use tracing_subscriber::fmt::MakeWriter;

    use super::LineWriter;

    fn log(line: &str) {
        web_sys::console::log_1(&line.into());
    }

    struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = LineWriter<fn(&str)>;

        fn make_writer(&'a self) -> Self::Writer {
            LineWriter::new(log as fn(&str))
        }
    }

    /// Install a subscriber that prints to `console.log`.
    pub fn init() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(MakeConsoleWriter)
            .without_time()
            .with_ansi(false)
            .try_init();
    }
}

#[cfg(target_arch = "wasm32")]
pub use console::init;
