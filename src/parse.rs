use crate::document::{attr, element_children, text_content, Document, Section};
use crate::model::Chapter;
use crate::{Result, Site};

/// Reads the series title from the first `<title>` in the head, minus the site suffix.
/// Returns `None` if there is no `<title>` at all; a blank title comes back as `Some("")`.
pub fn extract_title(doc: &Document, site: &Site) -> Result<Option<String>> {
    let titles = doc.elements_by_tag(Section::Head, "title")?;
    let Some(title) = titles.first() else {
        return Ok(None);
    };

    let text = text_content(title);
    let stripped = text
        .trim_end()
        .strip_suffix(site.title_suffix.as_str())
        .map(str::to_string);
    Ok(Some(stripped.unwrap_or(text)))
}

/// Collects the chapters listed on a full-chapter-list page, oldest first.
///
/// Chapter anchors are recognized by their `href`. The name lives in the first element below the
/// anchor child whose `class` contains the site's name marker. Anchors that don't follow that
/// layout are skipped, so a renamed marker class shows up as an empty list, not as an error.
pub fn extract_chapters(doc: &Document, site: &Site) -> Result<Vec<Chapter>> {
    let anchors = doc.elements_by_tag(Section::Body, "a")?;

    let mut chapters: Vec<Chapter> = anchors
        .iter()
        .filter_map(|anchor| {
            let href = attr(anchor, "href")?;
            if !href.contains(site.chapter_href_prefix.as_str()) {
                return None;
            }

            let info = element_children(anchor).find(|child| {
                attr(child, "class")
                    .is_some_and(|class| class.contains(site.chapter_name_marker.as_str()))
            })?;
            let name = element_children(&info).next().map(|e| text_content(&e))?;

            (!name.is_empty()).then(|| Chapter {
                name,
                url: href.to_string(),
            })
        })
        .collect();

    // The page lists the newest chapter first.
    chapters.reverse();
    Ok(chapters)
}

/// `src` of every `<img>` in the body, in page order. Missing or empty values are skipped.
pub fn extract_asset_uris(doc: &Document) -> Result<Vec<String>> {
    let images = doc.elements_by_tag(Section::Body, "img")?;
    Ok(images
        .iter()
        .filter_map(|img| attr(img, "src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES_PAGE: &str = include_str!("../tests/fixtures/series.html");
    const CHAPTER_LIST: &str = include_str!("../tests/fixtures/full_chapter_list.html");
    const CHAPTER_IMAGES: &str = include_str!("../tests/fixtures/chapter_images.html");

    fn site() -> Site {
        Site::weeb_central()
    }

    #[test]
    fn title_with_suffix() {
        let doc = Document::parse_str(
            "<html><head><title>Foo Bar | Weeb Central</title></head><body></body></html>",
        );
        assert_eq!(
            extract_title(&doc, &site()).unwrap().as_deref(),
            Some("Foo Bar")
        );
    }

    #[test]
    fn title_without_suffix_is_unchanged() {
        let doc = Document::parse_str("<head><title> Foo Bar </title></head>");
        assert_eq!(
            extract_title(&doc, &site()).unwrap().as_deref(),
            Some(" Foo Bar ")
        );
    }

    #[test]
    fn missing_title() {
        let doc = Document::parse_str("<html><head></head><body><p>hi</p></body></html>");
        assert_eq!(extract_title(&doc, &site()).unwrap(), None);
    }

    #[test]
    fn blank_title_is_not_missing() {
        let doc = Document::parse_str("<head><title></title></head>");
        assert_eq!(extract_title(&doc, &site()).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn title_from_saved_series_page() {
        let doc = Document::parse_str(SERIES_PAGE);
        assert_eq!(
            extract_title(&doc, &site()).unwrap().as_deref(),
            Some("Frieren: Beyond Journey's End")
        );
    }

    #[test]
    fn chapters_are_reversed() {
        let doc = Document::parse_str(
            r#"<body>
            <a href="https://weebcentral.com/chapters/B"><span class="grow flex"><span>Chapter 2</span></span></a>
            <a href="https://weebcentral.com/chapters/A"><span class="grow flex"><span>Chapter 1</span></span></a>
            </body>"#,
        );
        let chapters = extract_chapters(&doc, &site()).unwrap();
        assert_eq!(
            chapters,
            [
                Chapter {
                    name: "Chapter 1".into(),
                    url: "https://weebcentral.com/chapters/A".into()
                },
                Chapter {
                    name: "Chapter 2".into(),
                    url: "https://weebcentral.com/chapters/B".into()
                },
            ]
        );
    }

    #[test]
    fn chapters_from_saved_list() {
        let doc = Document::parse_str(CHAPTER_LIST);
        let chapters = extract_chapters(&doc, &site()).unwrap();
        let names: Vec<_> = chapters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Chapter 1", "Chapter 2", "Chapter 3", "Chapter 3.5"]);
        assert_eq!(
            chapters[0].url,
            "https://weebcentral.com/chapters/01J76XZ0000000000000000001"
        );
    }

    #[test]
    fn anchors_without_marker_are_skipped() {
        let doc = Document::parse_str(
            r#"<body>
            <a href="https://weebcentral.com/chapters/A"><span class="flex"><span>No marker</span></span></a>
            <a href="https://weebcentral.com/chapters/B"><span class="grow"></span></a>
            <a href="https://weebcentral.com/chapters/C"><span class="grow"><span></span></span></a>
            <a href="https://weebcentral.com/series/X"><span class="grow"><span>Not a chapter</span></span></a>
            <a><span class="grow"><span>No href</span></span></a>
            </body>"#,
        );
        assert!(extract_chapters(&doc, &site()).unwrap().is_empty());
    }

    #[test]
    fn only_first_marked_child_is_used() {
        let doc = Document::parse_str(
            r#"<body>
            <a href="https://weebcentral.com/chapters/A">
              <span class="grow">text first <em>Chapter 7</em><span>Ignored</span></span>
              <span class="grow"><span>Second marker</span></span>
            </a>
            </body>"#,
        );
        let chapters = extract_chapters(&doc, &site()).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].name, "Chapter 7");
    }

    #[test]
    fn duplicates_pass_through() {
        let anchor = r#"<a href="https://weebcentral.com/chapters/A"><span class="grow"><span>Chapter 1</span></span></a>"#;
        let doc = Document::parse_str(&format!("<body>{anchor}{anchor}</body>"));
        assert_eq!(extract_chapters(&doc, &site()).unwrap().len(), 2);
    }

    #[test]
    fn asset_uris_in_order() {
        let doc = Document::parse_str(CHAPTER_IMAGES);
        let uris = extract_asset_uris(&doc).unwrap();
        assert_eq!(
            uris,
            [
                "https://scans.example.net/manga/Frieren/0001-001.png",
                "https://scans.example.net/manga/Frieren/0001-002.png",
                "https://scans.example.net/manga/Frieren/0001-003.png?v=2",
            ]
        );
    }

    #[test]
    fn asset_uris_skip_empty_src() {
        let doc = Document::parse_str(
            r#"<head><link rel="icon"></head><body><img><img src=""><img src="a.png"></body>"#,
        );
        assert_eq!(extract_asset_uris(&doc).unwrap(), ["a.png"]);
    }
}
