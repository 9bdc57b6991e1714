use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use export_set::platform::open_log_file_secure_append;
use export_set::{CancelToken, ExportOptions, Record, export_sets};
use tempfile::tempdir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes into a shared Vec<u8>.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured<F: FnOnce()>(level: &str, f: F) -> String {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_target(false)
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new(level)).with(layer);

    // Scoped so other tests keep their own subscriber
    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, f);

    let guard = buf.lock().unwrap();
    String::from_utf8_lossy(&guard[..]).to_string()
}

#[test]
fn record_failures_are_logged_with_stage_and_code() {
    let td = tempdir().unwrap();
    let logs = captured("info", || {
        export_sets(
            vec![Record::new("   ", "", ""), Record::new("Alien", "", "")],
            td.path(),
            &ExportOptions::default(),
            &CancelToken::new(),
        );
    });
    assert!(logs.contains("Failed to export set"), "{logs}");
    assert!(logs.contains("stage=sanitize"), "{logs}");
    assert!(logs.contains("code=30"), "{logs}");
    assert!(logs.contains("Wrote descriptor"), "{logs}");
    assert!(logs.contains("written=1"), "{logs}");
}

#[test]
fn sanitized_names_are_logged_at_debug() {
    let td = tempdir().unwrap();
    let logs = captured("debug", || {
        export_sets(
            vec![Record::new("Action/Adventure", "", "")],
            td.path(),
            &ExportOptions::default(),
            &CancelToken::new(),
        );
    });
    assert!(logs.contains("Sanitized set name"), "{logs}");
    assert!(logs.contains("Action_Adventure"), "{logs}");
}

#[test]
fn file_logging_writes_to_custom_path() {
    let td = tempdir().unwrap();
    let log_path = td.path().join("export_set_test.log");

    // The production logger refuses symlinked ancestors (common for macOS temp dirs)
    if export_set::path_has_symlink_ancestor(&log_path).unwrap() {
        eprintln!("Skipping file logging test: symlink ancestor in {}", log_path.display());
        return;
    }

    let file = open_log_file_secure_append(&log_path).expect("open_log_file_secure_append");
    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_target(false)
        .compact();
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("file-logging-test: written");
    });
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("file-logging-test"), "{contents}");
}
