use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::Error;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Sent as `User-Agent` on every request, whatever the caller's headers say.
pub const USER_AGENT: &str = concat!("webber/", env!("CARGO_PKG_VERSION"));

// Need custom type because reqwest::Method allow arbitrary method.
/// The HTTP methods a [`Request`](crate::Request) can be issued with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            method => return Err(Error::UnknownMethod(method.to_string())),
        })
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        };
        write!(f, "{}", str)
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

/// Shorthands accepted wherever a content type is parsed from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Json,
    /// URL encoded (percent encoded)
    Form,
    /// Anything else containing a `/`, passed through untouched
    Other(String),
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "text" | "text/plain" => ContentType::Text,
            "json" | CONTENT_TYPE_JSON => ContentType::Json,
            "form" | CONTENT_TYPE_FORM => ContentType::Form,
            other if other.contains('/') => ContentType::Other(s.to_string()),
            content_type => return Err(Error::UnknownContentType(content_type.to_string())),
        })
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match &self {
            ContentType::Text => "text/plain",
            ContentType::Json => CONTENT_TYPE_JSON,
            ContentType::Form => CONTENT_TYPE_FORM,
            ContentType::Other(other) => other.as_str(),
        };
        write!(f, "{}", str)
    }
}
