//! Error types for the Swim4Love binary.

use swim4love_db::DbError;
use swim4love_server::{ConfigError, ServerError};

/// Anything that can stop the server from starting or keep it from
/// running.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The configuration file or an environment override is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Connecting to or preparing the database failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: DbError,
    },

    /// The avatar directory could not be created.
    #[error("avatar directory {path}: {source}")]
    Avatars {
        /// Directory that was being prepared.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The embedded page templates failed to compile.
    #[error("template error: {message}")]
    Templates {
        /// Description of the template failure.
        message: String,
    },

    /// The HTTP server failed to bind or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },
}
