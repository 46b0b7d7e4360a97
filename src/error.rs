//! The crate level error type.

/// The errors that may occur while talking to the expense API or driving the
/// browser.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status and no usable body.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The response body was not the JSON shape we expected.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The server reported a logical error in its `error` field.
    ///
    /// The message is shown to the user verbatim.
    #[error("{0}")]
    Server(String),

    /// A required form field was left empty.
    #[error("{0}")]
    Validation(&'static str),

    /// An authenticated operation was attempted without a stored user id.
    #[error("no active session")]
    NoSession,

    /// Browser local storage is unavailable or rejected a write.
    #[error("local storage unavailable: {0}")]
    Storage(String),

    /// The charting library rejected a chart configuration.
    #[error("chart error: {0}")]
    Chart(String),
}

impl Error {
    /// Whether the failure happened below the application protocol, i.e. the
    /// server never gave us a JSON answer to act on.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Status(_) | Error::Decode(_))
    }
}
