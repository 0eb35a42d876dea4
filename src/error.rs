//! Unified error type for the Active Hub peripheral.
//!
//! Each subsystem keeps its own typed error; they all convert into
//! [`Error`] so callers that don't care which layer failed can use `?`.
//! None of these are process-fatal: the dispatcher turns every inbound
//! failure into a logged drop, and transport failures leave the lifecycle
//! where it was.

use core::fmt;

use crate::app::ports::TransportError;
use crate::config::ConfigError;
use crate::rpc::catalog::CatalogError;
use crate::rpc::codec::CodecError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Framing failed (encode or decode).
    Codec(CodecError),
    /// A structured message could not be serialised.
    Catalog(CatalogError),
    /// The transport rejected a service-add or advertising request.
    Transport(TransportError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Transport(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
