use std::{collections::HashMap, time::Duration};

use crate::http::Method;
use crate::payload::Payload;

/// Everything needed to issue one call.
///
/// Build it, hand it to an [`Executor`](crate::Executor), and it is consumed by the call.
#[derive(Debug, Default)]
pub struct Request {
    pub uri: String,
    pub headers: HashMap<String, String>,
    pub method: Method,
    pub content_type: Option<String>,
    /// Kept for callers that want to record it, the transport timeout is what applies.
    pub timeout: Option<Duration>,
    /// Ask for gzip and gunzip the body when reading it
    pub gzip: bool,
    pub(crate) params: HashMap<String, String>,
    pub(crate) payload: Payload,
}

impl Request {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// A GET carrying `params` in its query string.
    pub fn get(uri: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self::new(uri).method(Method::Get).params(params)
    }

    /// A POST carrying `payload` as its body.
    pub fn post(uri: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self::new(uri).method(Method::Post).payload(payload)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Set the query parameters, dropping any payload.
    pub fn params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self.payload = Payload::Empty;
        self
    }

    /// Set the body, dropping any query parameters.
    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self.params.clear();
        self
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn body(&self) -> &Payload {
        &self.payload
    }
}
