use reqwest::{Response, StatusCode};

/// Everything that can go wrong while talking to Spotify or Apple Music.
///
/// A track without a catalog match is not represented here; matching
/// functions report that as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network, HTTP or response-body decoding failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A remote service answered with a non-success status.
    #[error("{service} answered with {status}: {body}")]
    Api {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The Apple Music token page no longer has the expected layout.
    #[error("failed to scrape token page: {0}")]
    Scrape(String),

    /// The given URL does not contain a `/playlist/<id>` segment.
    #[error("invalid playlist url: {0}")]
    InvalidPlaylistUrl(String),

    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Passes successful responses through and turns any other status into
    /// [`Error::Api`], keeping the body for diagnostics.
    pub(crate) async fn check_response(
        service: &'static str,
        response: Response,
    ) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            service,
            status,
            body,
        })
    }
}
