//! Small helper for making HTTP requests and reading their bodies.
//!
//! A [`Request`] describes one call: URI, method, headers, content type and either query
//! parameters or a [`Payload`]. An [`Executor`] sends it over a shared [`Transport`] and returns
//! a [`Response`] whose body can be drained into memory, gunzipped if asked.
//!
//! ```no_run
//! # async fn run() -> webber::Result<()> {
//! use std::collections::HashMap;
//! use webber::{Executor, Transport, TransportConfig};
//!
//! let executor = Executor::new(Transport::new(TransportConfig::default())?);
//! let params = HashMap::from([("id".to_string(), "2".to_string())]);
//! let response = executor.get("https://example.com/posts", params).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod http;
mod payload;
mod query;
mod request;
mod response;
mod transport;

pub use error::{Error, Result};
pub use executor::Executor;
pub use http::{ContentType, Method, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, USER_AGENT};
pub use payload::{Payload, Structured};
pub use query::url_with_query;
pub use request::Request;
pub use response::Response;
pub use transport::{Transport, TransportConfig, DEFAULT_MAX_IDLE_PER_HOST, DEFAULT_TIMEOUT};
