use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use reqwest::Url;

use crate::{
    Error, Result, CHAPTER_NAME_MARKER, DEFAULT_CHAPTER_DELAY_MS, DEFAULT_SITE, TITLE_SUFFIX,
    USER_AGENT,
};

/// Everything that ties the pipeline to one particular source site.
#[derive(Debug, Clone)]
pub struct Site {
    /// Scheme and authority without a trailing slash, e.g. `https://weebcentral.com`.
    pub base_url: String,
    /// Anchors whose `href` contains this prefix are chapter links.
    pub chapter_href_prefix: String,
    /// Stripped from the end of the series page `<title>`.
    pub title_suffix: String,
    /// Substring of the `class` attribute on the anchor child that holds the chapter name.
    pub chapter_name_marker: String,
    pub user_agent: String,
    series_pattern: Regex,
}

impl Site {
    /// Builds the markers for a site rooted at `base_url`.
    /// The host (and port, if any) of `base_url` becomes the marker the series id is matched behind.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|_| Error::InvalidLocator(base_url.into()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidLocator(base_url.into()));
        }
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidLocator(base_url.into()))?;
        let host_marker = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let base_url = base_url.trim_end_matches('/').to_string();
        let series_pattern = Regex::new(&format!(
            r"{}/series/([A-Z0-9]+)",
            regex::escape(&host_marker)
        ))
        .map_err(|_| Error::InvalidLocator(base_url.clone()))?;

        Ok(Self {
            chapter_href_prefix: format!("{base_url}/chapters/"),
            base_url,
            title_suffix: TITLE_SUFFIX.to_string(),
            chapter_name_marker: CHAPTER_NAME_MARKER.to_string(),
            user_agent: USER_AGENT.to_string(),
            series_pattern,
        })
    }

    pub fn weeb_central() -> Self {
        Self::new(DEFAULT_SITE).expect("default site URL is valid")
    }

    /// Matches `<host>/series/<TOKEN>` with the token in group 1.
    pub fn series_pattern(&self) -> &Regex {
        &self.series_pattern
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::weeb_central()
    }
}

/// One run of the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Series page the user asked for.
    pub locator: String,
    /// The series folder is created inside this directory.
    pub output_dir: PathBuf,
    /// Pause between two chapters that hit the server.
    pub chapter_delay: Duration,
    /// Record a failed chapter and move on instead of aborting the run.
    pub keep_going: bool,
    pub site: Site,
}

impl Config {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            output_dir: PathBuf::from("."),
            chapter_delay: Duration::from_millis(DEFAULT_CHAPTER_DELAY_MS),
            keep_going: false,
            site: Site::default(),
        }
    }
}
