use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock, RwLockWriteGuard};

/// stderr writer that also copies every line into the optional log file.
#[derive(Clone)]
struct TeeWriter {
    file: Arc<RwLock<Option<File>>>,
}

impl TeeWriter {
    fn new() -> Self {
        Self {
            file: Arc::new(RwLock::new(None)),
        }
    }

    fn file(&self) -> io::Result<RwLockWriteGuard<'_, Option<File>>> {
        self.file
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TeeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        if let Some(file) = &mut *self.file()? {
            let _ = file.write_all(&buf[..written]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut *self.file()? {
            let _ = file.flush();
        }
        Ok(())
    }
}

static WRITER: OnceLock<TeeWriter> = OnceLock::new();

/// Installs the global subscriber (`RUST_LOG`, default `info`) and bridges
/// `log` records into it. Safe to call more than once.
pub fn init(log_file: Option<&Path>) {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let writer = WRITER.get_or_init(TeeWriter::new).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .try_init();

    set_log_file(log_file);
}

/// Starts (or stops, with `None`) copying logs into `log_file`.
pub fn set_log_file(log_file: Option<&Path>) {
    let Some(writer) = WRITER.get() else {
        return;
    };
    let Ok(mut guard) = writer.file() else {
        return;
    };
    *guard = log_file.and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
}
