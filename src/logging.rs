//! Process-wide log level handling.
//!
//! The subscriber is installed once (stderr `fmt` layer behind an `EnvFilter`)
//! and the filter is wrapped in a reload layer so every merge can move the
//! level. `LOG_LEVEL` is the only source of the level; `RUST_LOG` is not
//! consulted, so the level a merge reports is the level the process filters at.

use crate::config::ConfigValue;
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::DEBUG;

static FILTER_HANDLE: OnceCell<reload::Handle<EnvFilter, Registry>> = OnceCell::new();

/// Parse a `LOG_LEVEL` value.
///
/// Accepts level names (case-insensitive, `warning` and `critical` included)
/// and the numeric scale 0/10/20/30/40/50 used by older stocklook configs.
pub fn parse_level(value: &ConfigValue) -> Option<LevelFilter> {
    match value {
        ConfigValue::Integer(n) => Some(level_from_number(*n)),
        ConfigValue::String(s) => {
            let name = s.trim();
            if let Ok(n) = name.parse::<i64>() {
                return Some(level_from_number(n));
            }
            match name.to_ascii_lowercase().as_str() {
                "trace" | "notset" => Some(LevelFilter::TRACE),
                "debug" => Some(LevelFilter::DEBUG),
                "info" => Some(LevelFilter::INFO),
                "warn" | "warning" => Some(LevelFilter::WARN),
                "error" | "critical" | "fatal" => Some(LevelFilter::ERROR),
                "off" => Some(LevelFilter::OFF),
                _ => None,
            }
        }
        ConfigValue::Null | ConfigValue::Map(_) => None,
    }
}

fn level_from_number(n: i64) -> LevelFilter {
    match n {
        i64::MIN..=0 => LevelFilter::TRACE,
        1..=10 => LevelFilter::DEBUG,
        11..=20 => LevelFilter::INFO,
        21..=30 => LevelFilter::WARN,
        31..=50 => LevelFilter::ERROR,
        _ => LevelFilter::OFF,
    }
}

/// Resolve the level for an optional `LOG_LEVEL` entry, falling back to
/// [`DEFAULT_LOG_LEVEL`] when it is absent or unrecognised.
pub fn resolve_level(value: Option<&ConfigValue>) -> LevelFilter {
    match value {
        None | Some(ConfigValue::Null) => DEFAULT_LOG_LEVEL,
        Some(v) => parse_level(v).unwrap_or_else(|| {
            tracing::warn!("Unrecognised LOG_LEVEL {}, using {}", v, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
    }
}

fn build_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).parse_lossy("")
}

/// Set the process log level, installing the subscriber on first use.
///
/// If another global subscriber was installed elsewhere, that subscriber
/// keeps deciding what is emitted and this call has no effect.
pub fn apply_level(level: LevelFilter) {
    match FILTER_HANDLE.get() {
        Some(handle) => {
            if let Err(e) = handle.reload(build_filter(level)) {
                tracing::warn!("Failed to reload log filter: {}", e);
            }
        }
        None => {
            let (filter, handle) = reload::Layer::new(build_filter(level));
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init();
            if installed.is_ok() {
                let _ = FILTER_HANDLE.set(handle);
            }
        }
    }
}

/// The level the process currently filters at.
pub fn configured_level() -> LevelFilter {
    LevelFilter::current()
}
