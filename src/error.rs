//! Startup error taxonomy. Every variant here is fatal: the steady-state
//! loop performs no I/O and has nothing left to fail once setup succeeds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed settings file, unknown key, or invalid value.
    #[error("config: {0}")]
    Config(String),

    /// File I/O during startup (config write-back, shader sources).
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The one-shot screen grab failed (no display, no monitor).
    #[error("screen capture: {0}")]
    Capture(String),

    /// A shader source could not be located in any search directory.
    #[error("shader '{name}' not found (searched {searched})")]
    ShaderNotFound { name: String, searched: String },
}
