use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins when set; otherwise
/// `--verbose` selects `debug` and the default is `warn`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex_lower(&Sha256::digest(bytes))
}

fn hex_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(format!("{byte:02x}").as_str());
    }
    out
}

pub fn read_text_or_exit(path: &Path, label: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("error: failed to read {label} {}: {err}", path.display());
        std::process::exit(2);
    })
}

pub fn write_text_or_exit(path: &Path, text: &str) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(err) = fs::create_dir_all(parent)
    {
        eprintln!("error: failed to create {}: {err}", parent.display());
        std::process::exit(2);
    }
    if let Err(err) = fs::write(path, text) {
        eprintln!("error: failed to write {}: {err}", path.display());
        std::process::exit(2);
    }
}

pub fn render_json_or_exit(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| {
        eprintln!("error: failed to render JSON: {err}");
        std::process::exit(2);
    })
}
