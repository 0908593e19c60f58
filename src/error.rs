use crate::response::Response;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed URI {uri:?}: {source}")]
    MalformedUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Could not encode the payload as JSON: {0}")]
    PayloadEncoding(#[source] serde_json::Error),
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("Could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("The response was unsuccessful: {}", .0.status())]
    UnsuccessfulStatus(Box<Response>),
    /// `response` is filled in when the caller no longer holds the response being read.
    #[error("Could not decompress the response body: {source}")]
    Decompression {
        #[source]
        source: std::io::Error,
        response: Option<Box<Response>>,
    },
    #[error("Could not read the response body: {source}")]
    Read {
        #[source]
        source: reqwest::Error,
        response: Option<Box<Response>>,
    },
    #[error("Could not decode the response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),
    #[error("Unknown Content-Type: {0}")]
    UnknownContentType(String),
}

impl Error {
    /// The response this error came with, if any.
    ///
    /// Set for [`Error::UnsuccessfulStatus`] and for body failures raised by
    /// [`Executor::fetch`](crate::Executor::fetch). Transport-level failures never produced a
    /// response, so this is `None` for them.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::UnsuccessfulStatus(response) => Some(response),
            Error::Decompression { response, .. } | Error::Read { response, .. } => {
                response.as_deref()
            }
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            Error::UnsuccessfulStatus(response) => Some(*response),
            Error::Decompression { response, .. } | Error::Read { response, .. } => {
                response.map(|response| *response)
            }
            _ => None,
        }
    }

    /// Attach `response` to a body failure so it is not lost with the error.
    pub(crate) fn with_response(self, response: Box<Response>) -> Self {
        match self {
            Error::Decompression { source, .. } => Error::Decompression {
                source,
                response: Some(response),
            },
            Error::Read { source, .. } => Error::Read {
                source,
                response: Some(response),
            },
            err => err,
        }
    }

    pub fn is_unsuccessful_status(&self) -> bool {
        matches!(self, Error::UnsuccessfulStatus(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
