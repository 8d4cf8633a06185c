//! Diagnostic logging for the `unihelp` binary.
//!
//! The CLI prints its results on stdout, so log records never go there. When
//! `UNIHELP_LOG` is set they are written to a file of their own, one file per
//! run; otherwise no subscriber is installed and the `tracing` macros in the
//! store, persistence and session code cost nothing.

use std::fs::File;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the base path of the log file.
pub const LOG_ENV_VAR: &str = "UNIHELP_LOG";

/// Level used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// File for one run: `{base}.{unix_seconds}.{pid}`, so two commands started
/// in the same second still log apart.
fn run_log_path(base: &str, started: DateTime<Utc>, pid: u32) -> PathBuf {
    PathBuf::from(format!("{base}.{}.{pid}", started.timestamp()))
}

/// Install the file logger if `UNIHELP_LOG` names a path.
pub fn init_tracing() {
    let Some(base) = std::env::var(LOG_ENV_VAR).ok().filter(|p| !p.is_empty()) else {
        return;
    };
    let path = run_log_path(&base, Utc::now(), std::process::id());

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot write log file {}: {e}", path.display());
            return;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let records = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry().with(filter).with(records).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_log_path_appends_start_time_and_pid() {
        let started = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(
            run_log_path("/tmp/unihelp.log", started, 42),
            PathBuf::from("/tmp/unihelp.log.1700000000.42")
        );
    }
}
