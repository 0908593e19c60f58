use std::collections::HashMap;

use url::Url;

use crate::error::{Error, Result};

/// Parse `uri` and append `params` to whatever query string it already has.
///
/// Existing pairs are kept as they are. New pairs are form-urlencoded and appended in key order
/// so that the same inputs always give the same URL.
pub fn url_with_query(uri: &str, params: &HashMap<String, String>) -> Result<Url> {
    let mut url = Url::parse(uri).map_err(|source| Error::MalformedUri {
        uri: uri.to_string(),
        source,
    })?;
    if params.is_empty() {
        return Ok(url);
    }
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort();
    url.query_pairs_mut().extend_pairs(sorted);
    Ok(url)
}
