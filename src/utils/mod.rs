use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use dirs::home_dir;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIR_NAME: &str = ".bookkeeping_core";
const HOME_ENV: &str = "BOOKKEEPING_HOME";
const DEFAULT_DIRECTIVE: &str = "bookkeeping_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// A valid `RUST_LOG` replaces the default `bookkeeping_core=info` filter.
/// Output goes to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = log_filter(env::var("RUST_LOG").ok().as_deref());

        // A subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Filter built from a `RUST_LOG` value, falling back to the crate default
/// when it is unset, blank, or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Returns the application data directory, defaulting to `~/.bookkeeping_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Turns a display name into a lowercase, dash-separated file stem.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !slug.is_empty() && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "company".to_string()
    } else {
        trimmed.to_string()
    }
}
