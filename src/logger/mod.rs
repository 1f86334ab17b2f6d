//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format
//! - Size based file rotation with optional gzip compression
//! - Changing the level filter at runtime through [`LogLevelHandle`]

pub mod config;
pub mod error;
pub(crate) mod rotation;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt,
    layer::{Layered, SubscriberExt},
    reload,
    util::SubscriberInitExt,
};
use writer::RotatingFileWriter;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync + 'static>;

/// Handle to the installed level filter
#[derive(Clone)]
pub struct LogLevelHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replace the active filter, e.g. `"debug"` or `"pushgate=trace,info"`
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| LoggerError::config(format!("Invalid filter '{}': {}", level, e)))?;
        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::subscriber(e.to_string()))
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let (filter, inner) = reload::Layer::new(build_filter(&config.level));

    // File layer goes BEFORE the console layer, otherwise span fields get
    // formatted with the console's ANSI setting and escape codes leak into the file.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file_layer = if config.file.enabled {
        Some(file_layer(&config.file)?)
    } else {
        None
    };

    let use_ansi = config.console.colored && std::io::stdout().is_terminal();
    let console_layer = config.console.enabled.then(|| {
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::subscriber(e.to_string()))?;

    Ok(LogLevelHandle { inner })
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = RotatingFileWriter::new(config)?;

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}
