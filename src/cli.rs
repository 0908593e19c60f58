use std::{collections::HashMap, time::Duration};

use structopt::StructOpt;
use webber::{url_with_query, ContentType, Method, Request};

#[derive(Debug, Clone, StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct CliArgs {
    #[structopt(
        short = "m",
        long,
        default_value = "GET",
        help = "The HTTP method to use (case-insensitive). \
        Supported methods: GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS"
    )]
    pub method: Method,
    #[structopt(
        short = "t",
        long = "type",
        help = "Value for the Content-Type header, can be:\n\
                - text: for text/plain\n\
                - json: for application/json\n\
                - form: for application/x-www-form-urlencoded\n\
                - any other media type, sent as is"
    )]
    pub content_type: Option<ContentType>,
    #[structopt(short, long, help = "The request body, sent as is")]
    pub data: Option<String>,
    #[structopt(
        short = "H",
        long = "header",
        number_of_values = 1,
        parse(try_from_str = parse_header),
        help = "Extra header in the form `Name: value`, can be repeated"
    )]
    pub headers: Vec<(String, String)>,
    #[structopt(
        short = "q",
        long = "query",
        number_of_values = 1,
        parse(try_from_str = parse_query),
        help = "Query parameter in the form `key=value`, can be repeated"
    )]
    pub query: Vec<(String, String)>,
    #[structopt(short, long, help = "Ask for a gzip body and decompress it")]
    pub gzip: bool,
    #[structopt(
        long,
        default_value = "1000",
        help = "Timeout in milliseconds, used for connecting, the TLS handshake and the whole request"
    )]
    pub timeout_ms: u64,
    #[structopt(help = "The URL to send the request to")]
    pub url: String,
}

impl CliArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Turn the arguments into a request. Query parameters go straight into the URL so they can
    /// be combined with a body.
    pub fn into_request(self) -> webber::Result<Request> {
        let params: HashMap<String, String> = self.query.into_iter().collect();
        let url = url_with_query(&self.url, &params)?;
        let mut request = Request::new(url.as_str())
            .method(self.method)
            .gzip(self.gzip);
        for (name, value) in self.headers {
            request = request.header(name, value);
        }
        if let Some(content_type) = self.content_type {
            request = request.content_type(content_type.to_string());
        }
        if let Some(body) = self.data {
            request = request.payload(body);
        }
        Ok(request)
    }
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected `Name: value`, got {:?}", s)),
    }
}

fn parse_query(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected `key=value`, got {:?}", s)),
    }
}

/// Parse the command line arguments
pub fn args() -> CliArgs {
    let mut args = CliArgs::from_args();
    let url = args.url.as_str();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        args.url.insert_str(0, "http://");
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::from_iter_safe(std::iter::once("webber").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn header_is_split_on_first_colon() {
        assert_eq!(
            parse_header("Authorization: Bearer a:b").unwrap(),
            ("Authorization".to_string(), "Bearer a:b".to_string())
        );
        assert!(parse_header("no colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn query_is_split_on_first_eq() {
        assert_eq!(
            parse_query("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_query("flag=").unwrap(), ("flag".to_string(), String::new()));
        assert!(parse_query("=x").is_err());
    }

    #[test]
    fn defaults() {
        let args = parse(&["http://example.com"]);
        assert_eq!(args.method, Method::Get);
        assert_eq!(args.timeout(), Duration::from_millis(1000));
        assert!(!args.gzip);
    }

    #[test]
    fn builds_request_with_query_and_body() {
        let args = parse(&[
            "-m",
            "post",
            "-t",
            "json",
            "-d",
            r#"{"a":1}"#,
            "-H",
            "X-Trace: 7",
            "-q",
            "page=2",
            "--gzip",
            "http://example.com/items?sort=asc",
        ]);
        let request = args.into_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.uri, "http://example.com/items?sort=asc&page=2");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert_eq!(request.headers["X-Trace"], "7");
        assert!(request.gzip);
        assert!(!request.body().is_empty());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let argv = ["webber", "-m", "brew", "http://example.com"];
        assert!(CliArgs::from_iter_safe(argv.iter()).is_err());
    }
}
