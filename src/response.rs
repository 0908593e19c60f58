use std::{borrow::Cow, io::Read};

use bytes::{Bytes, BytesMut};
use flate2::read::MultiGzDecoder;
use reqwest::{
    header::{HeaderMap, CONTENT_ENCODING},
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Values of `Content-Encoding` that get gunzipped, `agzip` included.
const GZIP_ENCODINGS: [&str; 2] = ["gzip", "agzip"];

/// The outcome of a request that reached a server.
///
/// Status, headers and URL are available straight away. The body stays on the wire until
/// [`Response::read`] drains it into memory.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    data: Bytes,
    raw: Option<reqwest::Response>,
}

impl Response {
    pub(crate) fn new(raw: reqwest::Response) -> Self {
        Self {
            status: raw.status(),
            headers: raw.headers().clone(),
            url: raw.url().clone(),
            data: Bytes::new(),
            raw: Some(raw),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The body read so far, empty until [`Response::read`] has run.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Whether the body has been drained already.
    pub fn is_read(&self) -> bool {
        self.raw.is_none()
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
    }

    /// Drain the body into memory, gunzipping it when `decompress` is set and the server says it
    /// is gzip.
    ///
    /// Reading a second time does nothing. The connection is released whether or not draining
    /// succeeds.
    pub async fn read(&mut self, decompress: bool) -> Result<()> {
        let Some(mut raw) = self.raw.take() else {
            return Ok(());
        };
        let mut buf = BytesMut::new();
        while let Some(chunk) = raw.chunk().await.map_err(|source| Error::Read {
            source,
            response: None,
        })? {
            buf.extend_from_slice(&chunk);
        }
        drop(raw);

        let gzipped = self
            .content_encoding()
            .is_some_and(|encoding| GZIP_ENCODINGS.contains(&encoding));
        self.data = if decompress && gzipped {
            tracing::trace!(compressed = buf.len(), "gunzipping response body");
            gunzip(&buf)?
        } else {
            buf.freeze()
        };
        Ok(())
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.data).map_err(Error::Decode)
    }
}

fn gunzip(compressed: &[u8]) -> Result<Bytes> {
    // Concatenated members are all part of the body
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|source| Error::Decompression {
            source,
            response: None,
        })?;
    Ok(Bytes::from(out))
}
