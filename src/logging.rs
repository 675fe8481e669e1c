use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// TUI mode owns the terminal, so logs go to a file.
pub fn init_file_logging(path: &Path, level: &str) -> Result<()> {
    let log_file = std::sync::Arc::new(
        std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?,
    );
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!(path=%path.display(), "logging initialized");
    Ok(())
}

pub fn init_stderr_logging(level: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(level))
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("logging initialized");
    Ok(())
}

/// Scoped log capture for tests. Holds a thread-local subscriber until dropped.
#[cfg(test)]
pub(crate) struct LogCapture {
    buf: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

#[cfg(test)]
#[derive(Clone)]
struct CaptureWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl LogCapture {
    pub(crate) fn start() -> Self {
        let buf = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let writer = CaptureWriter(buf.clone());
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::new("debug"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        Self {
            buf,
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    /// The first captured line containing `message`.
    pub(crate) fn line_with(&self, message: &str) -> Option<String> {
        self.contents()
            .lines()
            .find(|l| l.contains(message))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::warn;

    #[test]
    fn capture_sees_level_and_message() {
        let logs = LogCapture::start();
        warn!(count = 3, "something off");
        let line = logs.line_with("something off").unwrap();
        assert!(line.contains("WARN"));
        assert!(line.contains("count=3"));
    }
}
