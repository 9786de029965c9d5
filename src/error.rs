use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid locator, expected an http(s) URI: {0}")]
    InvalidLocator(String),
    #[error("Couldn't extract a series id from locator: {0}")]
    MissingSeriesId(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Couldn't parse the document from {url}: {reason}")]
    Parse { url: String, reason: String },
    #[error("Found no {what} in the document from {url}")]
    ExtractionEmpty { what: &'static str, url: String },

    #[error("Name can't be turned into a valid file name: {name:?}")]
    Unsanitizable { name: String },
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    InvalidSelector(String),
    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn transport(url: impl Into<String>) -> impl FnOnce(reqwest::Error) -> Self {
        let url = url.into();
        move |source| Error::Transport { url, source }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Filesystem { path, source }
    }
}
