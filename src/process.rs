use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::locator::{
    asset_filename, asset_list_locator, chapter_list_locator, extract_series_id, validate_locator,
};
use crate::model::{Chapter, ChapterOutcome, RunSummary};
use crate::parse::{extract_asset_uris, extract_chapters, extract_title};
use crate::request::HttpClient;
use crate::sanitize::sanitize_name;
use crate::{info_time, warn_time, Config, Error, Result};

/// Downloads every chapter of the series behind `config.locator`.
///
/// Chapters are handled strictly one after another. A chapter whose folder already exists is
/// treated as done and skipped. Unless `config.keep_going` is set the first failing chapter
/// aborts the run; otherwise it is recorded in the returned summary.
pub async fn process_series(config: &Config) -> Result<RunSummary> {
    let start_time = Local::now();
    let site = &config.site;

    validate_locator(&config.locator)?;
    info_time!("Series locator: {}", config.locator);

    let series_id = extract_series_id(site.series_pattern(), &config.locator)
        .ok_or_else(|| Error::MissingSeriesId(config.locator.clone()))?;
    info_time!("Series ID: {series_id}");

    let client = HttpClient::new(&site.user_agent)?;

    info_time!("Looking up series title...");
    let title = client
        .fetch_document(&config.locator, {
            let site = site.clone();
            move |doc| extract_title(doc, &site)
        })
        .await?
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::ExtractionEmpty {
            what: "series title",
            url: config.locator.clone(),
        })?;
    info_time!("Series title: {title}");

    let series_dir = create_series_dir(&config.output_dir, &title).await?;
    info_time!("Series folder: {}", series_dir.display());

    let list_url = chapter_list_locator(&site.base_url, &series_id);
    info_time!("Chapter list: {list_url}");
    let chapters = client
        .fetch_document(&list_url, {
            let site = site.clone();
            move |doc| extract_chapters(doc, &site)
        })
        .await?;
    if chapters.is_empty() {
        return Err(Error::ExtractionEmpty {
            what: "chapters",
            url: list_url,
        });
    }

    let chapter_count = chapters.len();
    info_time!("Found {chapter_count} chapters");

    let mut results = Vec::with_capacity(chapter_count);
    for (i, chapter) in chapters.into_iter().enumerate() {
        info_time!(
            "[{}/{chapter_count}] {} -> {}",
            i + 1,
            chapter.name,
            chapter.url
        );

        let outcome = match process_chapter(&client, &series_dir, &chapter).await {
            Ok(outcome) => outcome,
            Err(e) if config.keep_going => {
                warn_time!("Chapter {} failed: {e}", chapter.name);
                ChapterOutcome::Failed(e.to_string())
            }
            Err(e) => return Err(e),
        };
        info_time!("    {outcome}");

        let is_last = i + 1 == chapter_count;
        if outcome.touched_network() && !is_last && !config.chapter_delay.is_zero() {
            info_time!(
                "    Sleeping for {} ms before the next chapter",
                config.chapter_delay.as_millis()
            );
            tokio::time::sleep(config.chapter_delay).await;
        }
        results.push((chapter, outcome));
    }

    let summary = RunSummary {
        title,
        series_dir,
        chapters: results,
    };
    info_time!(
        start_time,
        "Finished {} chapters, {} failed.",
        summary.chapters.len(),
        summary.failed_chapters()
    );
    Ok(summary)
}

async fn create_series_dir(output_dir: &Path, title: &str) -> Result<PathBuf> {
    let folder_name = sanitize_name(title);
    if folder_name.is_empty() {
        return Err(Error::Unsanitizable { name: title.into() });
    }
    let series_dir = output_dir.join(folder_name);
    tokio::fs::create_dir_all(&series_dir)
        .await
        .map_err(Error::filesystem(&series_dir))?;
    Ok(series_dir)
}

/// Creates the chapter folder and downloads its images into it.
async fn process_chapter(
    client: &HttpClient,
    series_dir: &Path,
    chapter: &Chapter,
) -> Result<ChapterOutcome> {
    let folder_name = sanitize_name(&chapter.name);
    if folder_name.is_empty() {
        return Err(Error::Unsanitizable {
            name: chapter.name.clone(),
        });
    }

    let chapter_dir = series_dir.join(folder_name);
    match tokio::fs::create_dir(&chapter_dir).await {
        Ok(()) => info_time!("    Created chapter folder: {}", chapter_dir.display()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Ok(ChapterOutcome::SkippedExisting);
        }
        Err(e) => return Err(Error::filesystem(&chapter_dir)(e)),
    }

    let images_url = asset_list_locator(&chapter.url);
    let asset_uris = client
        .fetch_document(&images_url, extract_asset_uris)
        .await
        .and_then(|uris| {
            if uris.is_empty() {
                Err(Error::ExtractionEmpty {
                    what: "images",
                    url: images_url.clone(),
                })
            } else {
                Ok(uris)
            }
        });
    let asset_uris = match asset_uris {
        Ok(uris) => uris,
        Err(e) => {
            // Nothing was written yet, drop the folder so the next run picks the chapter up again.
            remove_empty_chapter_dir(&chapter_dir).await;
            return Err(e);
        }
    };

    let asset_count = asset_uris.len();
    let mut failed_assets = 0;
    for (j, uri) in asset_uris.iter().enumerate() {
        let filename = asset_filename(uri);
        if filename.is_empty() {
            warn_time!("    [{}/{asset_count}] {uri}: no usable file name, skipped", j + 1);
            failed_assets += 1;
            continue;
        }

        let path = chapter_dir.join(filename);
        match client.download_to_file(uri, &path).await {
            Ok(()) => info_time!("    [{}/{asset_count}] {uri} -> {}", j + 1, path.display()),
            Err(e) => {
                warn_time!("    [{}/{asset_count}] {e}", j + 1);
                failed_assets += 1;
            }
        }
    }

    Ok(ChapterOutcome::Downloaded {
        assets: asset_count - failed_assets,
        failed_assets,
    })
}

/// Removes a chapter folder that holds no downloads. A folder left behind would mark the
/// chapter as done on the next run, so a failure is reported. Returns whether it was removed.
async fn remove_empty_chapter_dir(chapter_dir: &Path) -> bool {
    match tokio::fs::remove_dir(chapter_dir).await {
        Ok(()) => true,
        Err(e) => {
            warn_time!(
                "    Couldn't remove {}: {e}. Delete it by hand or the chapter is skipped next run.",
                chapter_dir.display()
            );
            false
        }
    }
}
