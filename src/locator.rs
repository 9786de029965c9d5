//! Locator handling: validation, series id lookup and the locators and file names derived from them.

use regex::Regex;
use reqwest::Url;

use crate::sanitize::sanitize_name_bytes;
use crate::{Error, Result};

const ASSET_LIST_QUERY: &str = "images?is_prev=False&current_page=1&reading_style=long_strip";

/// Accepts only well-formed `http` and `https` URIs.
pub fn validate_locator(locator: &str) -> Result<Url> {
    match Url::parse(locator) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(Error::InvalidLocator(locator.into())),
    }
}

/// Returns the first `<host>/series/<TOKEN>` token found in `locator`.
/// `pattern` must capture the token in group 1, see [`crate::Site`].
pub fn extract_series_id(pattern: &Regex, locator: &str) -> Option<String> {
    pattern
        .captures(locator)
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str().to_string())
}

pub fn chapter_list_locator(base_url: &str, series_id: &str) -> String {
    format!("{base_url}/series/{series_id}/full-chapter-list")
}

pub fn asset_list_locator(chapter_locator: &str) -> String {
    format!(
        "{}/{ASSET_LIST_QUERY}",
        chapter_locator.trim_end_matches('/')
    )
}

/// Derives a safe file name from the last path segment of an asset URI.
/// Query and fragment are cut off and percent escapes decoded before sanitizing.
/// Returns an empty string when nothing usable is left.
pub fn asset_filename(asset_uri: &str) -> String {
    let end = asset_uri.find(['?', '#']).unwrap_or(asset_uri.len());
    let path = &asset_uri[..end];
    let segment = path.rsplit('/').next().unwrap_or_default();
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    sanitize_name_bytes(&decoded)
}
