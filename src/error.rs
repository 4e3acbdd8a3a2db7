use thiserror::Error;

/// Errors surfaced by the core and the HTTP layer.
///
/// The first four variants are caller mistakes and are detected before any
/// provider call; the last two are server-side failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidYearRange(String),

    #[error("No valid country codes provided")]
    InvalidCountries,

    #[error("{0}")]
    MalformedInput(String),

    #[error("upstream fetch failed: {message}")]
    UpstreamFetch {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a provider failure, keeping the whole context chain in the message.
    pub fn upstream(err: anyhow::Error) -> Self {
        Self::UpstreamFetch {
            message: format!("{err:#}"),
            source: err.into(),
        }
    }

    /// True for 400-class errors.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidYearRange(_)
                | Self::InvalidCountries
                | Self::MalformedInput(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
