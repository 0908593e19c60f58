use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use reqwest::Body;
use serde::Serialize;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::error::{Error, Result};

/// A value that can be turned into a JSON request body.
///
/// Implemented for everything that is `Serialize`, it only exists so [`Payload`] can hold any
/// such value behind a box.
pub trait Structured: Send + Sync {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: Serialize + Send + Sync> Structured for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

type Reader = Box<dyn AsyncRead + Send + Sync + Unpin>;

/// What gets sent as the request body.
///
/// The variants are listed in the order they take priority: conversions always pick the most
/// specific one, and only `Structured` ever goes through serialization.
#[derive(Default)]
pub enum Payload {
    #[default]
    Empty,
    Text(String),
    Bytes(Bytes),
    /// Handed to the transport as is, it reads the stream while sending
    Stream(Reader),
    Structured(Box<dyn Structured>),
}

impl Payload {
    pub fn structured<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        Payload::Structured(Box::new(value))
    }

    pub fn reader<R: AsyncRead + Send + Sync + Unpin + 'static>(reader: R) -> Self {
        Payload::Stream(Box::new(reader))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Payload::Structured(_))
    }

    /// Turn the payload into a transport body, `None` meaning no body at all.
    pub fn into_body(self) -> Result<Option<Body>> {
        let body = match self {
            Payload::Empty => return Ok(None),
            Payload::Text(text) => Body::from(text),
            Payload::Bytes(bytes) => Body::from(bytes),
            Payload::Stream(reader) => Body::wrap_stream(ReaderStream::new(reader)),
            Payload::Structured(value) => {
                Body::from(value.to_json().map_err(Error::PayloadEncoding)?)
            }
        };
        Ok(Some(body))
    }
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Empty => write!(f, "Empty"),
            Payload::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Payload::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Payload::Stream(_) => write!(f, "Stream(..)"),
            Payload::Structured(_) => write!(f, "Structured(..)"),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
