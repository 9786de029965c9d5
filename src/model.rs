use std::fmt;
use std::path::PathBuf;

/// One entry of a series' chapter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
    /// Chapter page; its asset list lives below it.
    pub url: String,
}

/// What happened to a chapter during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterOutcome {
    Downloaded { assets: usize, failed_assets: usize },
    /// The chapter folder was already there, nothing was fetched.
    SkippedExisting,
    Failed(String),
}

impl ChapterOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ChapterOutcome::Failed(_))
    }

    /// Whether processing the chapter sent any requests to the source.
    pub(crate) fn touched_network(&self) -> bool {
        !matches!(self, ChapterOutcome::SkippedExisting)
    }
}

impl fmt::Display for ChapterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterOutcome::Downloaded {
                assets,
                failed_assets: 0,
            } => write!(f, "downloaded {assets} images"),
            ChapterOutcome::Downloaded {
                assets,
                failed_assets,
            } => write!(f, "downloaded {assets} images, {failed_assets} failed"),
            ChapterOutcome::SkippedExisting => write!(f, "skipped, folder exists"),
            ChapterOutcome::Failed(reason) => write!(f, "FAILED: {reason}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub title: String,
    pub series_dir: PathBuf,
    pub chapters: Vec<(Chapter, ChapterOutcome)>,
}

impl RunSummary {
    pub fn failed_chapters(&self) -> usize {
        self.chapters
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_chapters() == 0
    }
}
