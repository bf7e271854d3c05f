use crate::filter::Stage;

use std::fmt;

/// Errors produced while building or inspecting request headers.
///
/// Missing headers are never an error, they are reported as
/// `None` or an empty list by the accessors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A string did not match the grammar of the typed value it was parsed into.
    #[error("invalid {kind}: {input:?}")]
    Parse { kind: ParseKind, input: String },

    /// The operation is not available at the current filter stage.
    #[error("`{operation}` is not supported in the {stage} stage")]
    Unsupported {
        operation: &'static str,
        stage: Stage,
    },

    /// A header template could not be deserialized.
    #[cfg(feature = "json")]
    #[error("invalid header template: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(kind: ParseKind, input: impl Into<String>) -> Error {
        Error::Parse {
            kind,
            input: input.into(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, stage: Stage) -> Error {
        Error::Unsupported { operation, stage }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

/// The kind of value that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    MediaType,
    Locale,
    Date,
    Cookie,
}

impl fmt::Display for ParseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseKind::MediaType => "media type",
            ParseKind::Locale => "locale",
            ParseKind::Date => "HTTP date",
            ParseKind::Cookie => "cookie",
        })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
