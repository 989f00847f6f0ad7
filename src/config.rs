//! Runtime tuning knobs read from the environment.
//!
//! Each value is parsed once on first use and cached for the life of the
//! process. Unparseable values fall back to the default.

use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static CATALOG_CAPACITY: OnceLock<usize> = OnceLock::new();

/// Initial entry capacity reserved by a new shape catalog (`GRID_CATALOG_CAPACITY`).
pub fn catalog_capacity() -> usize {
    *CATALOG_CAPACITY.get_or_init(|| parse_env_usize("GRID_CATALOG_CAPACITY", 64).clamp(1, 4096))
}

static PARALLEL_INGEST_MIN: OnceLock<usize> = OnceLock::new();

/// Batch size at which shape ingestion fans out to the rayon pool
/// (`GRID_PARALLEL_INGEST_MIN`).
pub fn parallel_ingest_min() -> usize {
    *PARALLEL_INGEST_MIN.get_or_init(|| parse_env_usize("GRID_PARALLEL_INGEST_MIN", 16).max(2))
}

static BITCOPY_FAST: OnceLock<bool> = OnceLock::new();

/// Whether byte-aligned bit copies use raw byte moves (`GRID_BITCOPY_FAST`).
pub(crate) fn bitcopy_fast() -> bool {
    *BITCOPY_FAST.get_or_init(|| parse_env_bool_u8("GRID_BITCOPY_FAST", true))
}
