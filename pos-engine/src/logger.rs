//! Logging Infrastructure
//!
//! Console output plus, when a log directory is configured:
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs for sales and voids (never deleted)

use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::{Filter, Layered};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Target used by `tracing::info!(target: "audit", ...)`
pub const AUDIT_TARGET: &str = "audit";

/// Days an application log file is kept
const APP_LOG_RETENTION_DAYS: i64 = 14;

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;
type LogSubscriber = Layered<Vec<BoxedLayer>, FilteredRegistry>;

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn file_layer<F>(appender: RollingFileAppender, json_format: bool, filter: F) -> BoxedLayer
where
    F: Filter<FilteredRegistry> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .with_writer(Mutex::new(appender));
    if json_format {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}

/// Registry with the level filter in front of every output
fn build_subscriber(
    env_filter: EnvFilter,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<LogSubscriber> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    layers.push(if json_format {
        console.json().with_current_span(true).boxed()
    } else {
        console.boxed()
    });

    if let Some(log_dir) = log_dir {
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(file_layer(
            app_log,
            json_format,
            filter_fn(|meta| meta.target() != AUDIT_TARGET),
        ));

        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, "audit");
        layers.push(file_layer(
            audit_log,
            json_format,
            filter_fn(|meta| meta.target() == AUDIT_TARGET),
        ));
    }

    Ok(tracing_subscriber::registry().with(env_filter).with(layers))
}

/// Delete application log files older than the retention window
///
/// Rolling files are named `app.YYYY-MM-DD`.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(());
    }

    let cutoff = Utc::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && let Some(date_part) = name.strip_prefix("app.")
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }
    Ok(())
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` takes precedence
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// // Development setup (console only)
/// pos_engine::logger::init_logger_with_file("debug", false, None)?;
/// # Ok(())
/// # }
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let log_dir = log_dir.map(Path::new);
    build_subscriber(level_filter(level), json_format, log_dir)?.try_init()?;

    if let Some(dir) = log_dir {
        cleanup_old_logs(dir)?;
    }
    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_expired_app_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();

        let old = (Utc::now().date_naive() - chrono::Duration::days(30)).format("app.%Y-%m-%d");
        let fresh = Utc::now().date_naive().format("app.%Y-%m-%d");
        fs::write(app.join(old.to_string()), "old").unwrap();
        fs::write(app.join(fresh.to_string()), "new").unwrap();
        fs::write(app.join("notes.txt"), "keep").unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        assert!(!app.join(old.to_string()).exists());
        assert!(app.join(fresh.to_string()).exists());
        assert!(app.join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_without_app_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cleanup_old_logs(dir.path()).is_ok());
    }

    fn read_logs(dir: &Path) -> String {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect()
    }

    #[test]
    fn test_file_logs_respect_level() {
        let dir = tempfile::tempdir().unwrap();
        let subscriber =
            build_subscriber(EnvFilter::new("info"), false, Some(dir.path())).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!("trace line");
            tracing::debug!("debug line");
            tracing::info!("info line");
            tracing::debug!(target: AUDIT_TARGET, "audit debug line");
            tracing::info!(target: AUDIT_TARGET, "audit info line");
        });

        let app = read_logs(&dir.path().join("app"));
        assert!(app.contains("info line"));
        assert!(!app.contains("trace line"));
        assert!(!app.contains("debug line"));
        assert!(!app.contains("audit"));

        let audit = read_logs(&dir.path().join("audit"));
        assert!(audit.contains("audit info line"));
        assert!(!audit.contains("audit debug line"));
    }
}
