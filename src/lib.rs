//! WEEB CENTRAL DOWNLOADER
//! Fetches a series page, walks its chapter list and saves every chapter's images into
//! `<series title>/<chapter name>/`.

mod macros;

pub mod cli;
pub mod config;
pub mod document;
mod error;
pub mod locator;
pub mod model;
pub mod parse;
pub mod process;
pub mod request;
pub mod sanitize;

pub use config::{Config, Site};
pub use error::{Error, Result};
pub use model::{Chapter, ChapterOutcome, RunSummary};

const DEFAULT_SITE: &str = "https://weebcentral.com";
/// Suffix the site appends to every page `<title>`.
const TITLE_SUFFIX: &str = " | Weeb Central";
/// Class substring of the chapter-list element that wraps the chapter name.
const CHAPTER_NAME_MARKER: &str = "grow";
const USER_AGENT: &str = "Mozilla/5.0";
/// Keeps the source server from being hammered.
const DEFAULT_CHAPTER_DELAY_MS: u64 = 4000;
