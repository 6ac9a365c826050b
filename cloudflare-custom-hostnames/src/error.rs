//! Unified error type definition

use thiserror::Error;

use crate::transport::TransportError;

/// Error returned by every [`CustomHostnameClient`](crate::CustomHostnameClient)
/// operation.
///
/// Lower-level failures are wrapped together with a short description of the
/// step that failed; the original error stays reachable through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum Error {
    /// The request executor failed (network, auth, rate limit, non-2xx).
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: TransportError,
    },

    /// The response body is not the expected JSON envelope.
    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("{context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The operation exists on the resource but is not supported by this client.
    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },

    /// No custom hostname matched exactly.
    #[error("custom hostname '{hostname}' could not be found")]
    NotFound { hostname: String },

    /// Missing or malformed client configuration.
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl Error {
    /// The transport failure behind this error, if any.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Replaces the step description of a wrapped failure, keeping its source.
    pub(crate) fn recontext(self, context: &'static str) -> Self {
        match self {
            Self::Transport { source, .. } => Self::Transport { context, source },
            Self::Decode { source, .. } => Self::Decode { context, source },
            Self::Encode { source, .. } => Self::Encode { context, source },
            other => other,
        }
    }

    /// 是否为预期行为（资源不存在、凭证错误等），用于日志分级。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::NotImplemented { .. } => true,
            Self::Transport { source, .. } => source.is_expected(),
            _ => false,
        }
    }
}

/// Extension for attaching a step description to fallible calls.
pub(crate) trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, TransportError> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| Error::Transport { context, source })
    }
}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
