use std::collections::HashMap;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT,
};

use crate::error::{Error, Result};
use crate::http::CONTENT_TYPE_JSON;
use crate::payload::Payload;
use crate::query::url_with_query;
use crate::request::Request;
use crate::response::Response;
use crate::transport::Transport;

/// Issues [`Request`]s over a shared [`Transport`].
#[derive(Debug, Clone)]
pub struct Executor {
    transport: Transport,
}

impl Executor {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Send `request` and hand back the response with its body still unread.
    ///
    /// A status outside 200..300 comes back as [`Error::UnsuccessfulStatus`] carrying the
    /// response, so the caller can still look at it and read the body. Failing to reach the
    /// server at all is [`Error::Transport`].
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let Request {
            uri,
            headers,
            method,
            content_type,
            timeout,
            gzip,
            params,
            payload,
        } = request;

        let url = url_with_query(&uri, &params)?;
        let headers = build_headers(&headers, content_type.as_deref(), &payload, gzip)?;
        let body = payload.into_body()?;

        let mut builder = self
            .transport
            .client()
            .request(method.into(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        tracing::debug!(%method, %url, ?timeout, "sending request");
        let raw = builder.send().await.map_err(|err| {
            tracing::debug!(%method, %url, error = %err, "request failed");
            Error::Transport(err)
        })?;

        let response = Response::new(raw);
        if !response.is_success() {
            tracing::warn!(%method, %url, status = %response.status(), "unsuccessful response");
            return Err(Error::UnsuccessfulStatus(Box::new(response)));
        }
        tracing::debug!(%method, %url, status = %response.status(), "received response");
        Ok(response)
    }

    /// Like [`Executor::execute`], but the body is drained (and gunzipped if the request asked
    /// for gzip) before returning, on unsuccessful statuses too.
    ///
    /// If draining fails, the [`Error::Read`] or [`Error::Decompression`] carries the response.
    pub async fn fetch(&self, request: Request) -> Result<Response> {
        let gzip = request.gzip;
        match self.execute(request).await {
            Ok(response) => drain(Box::new(response), gzip).await.map(|response| *response),
            Err(Error::UnsuccessfulStatus(response)) => {
                Err(Error::UnsuccessfulStatus(drain(response, gzip).await?))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&self, uri: &str, params: HashMap<String, String>) -> Result<Response> {
        self.fetch(Request::get(uri, params)).await
    }

    pub async fn post(&self, uri: &str, payload: impl Into<Payload>) -> Result<Response> {
        self.fetch(Request::post(uri, payload)).await
    }
}

async fn drain(mut response: Box<Response>, gzip: bool) -> Result<Box<Response>> {
    match response.read(gzip).await {
        Ok(()) => Ok(response),
        Err(err) => {
            tracing::debug!(status = %response.status(), error = %err, "could not read body");
            Err(err.with_response(response))
        }
    }
}

/// Caller headers first, then the fixed `User-Agent`, then `Content-Type`.
///
/// Without an explicit content type, JSON is assumed only for structured payloads that did not
/// come with a `Content-Type` header of their own.
fn build_headers(
    headers: &HashMap<String, String>,
    content_type: Option<&str>,
    payload: &Payload,
    gzip: bool,
) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 3);
    for (name, value) in headers {
        map.insert(header_name(name)?, header_value(name, value)?);
    }
    map.insert(USER_AGENT, HeaderValue::from_static(crate::http::USER_AGENT));

    match content_type {
        Some(content_type) => {
            map.insert(CONTENT_TYPE, header_value("Content-Type", content_type)?);
        }
        None if payload.is_structured() && !map.contains_key(CONTENT_TYPE) => {
            map.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        }
        None => {}
    }

    if gzip && !map.contains_key(ACCEPT_ENCODING) {
        map.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
    }
    Ok(map)
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|err| Error::InvalidHeader {
        name: name.to_string(),
        reason: err.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|err| Error::InvalidHeader {
        name: name.to_string(),
        reason: err.to_string(),
    })
}
