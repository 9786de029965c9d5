//! Thin query layer over a parsed `scraper::Html` tree.
//! The extractors only ever look at the tree through these functions.

use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result};

/// Part of the document a lookup is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Body,
}

impl Section {
    fn tag(self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::Body => "body",
        }
    }
}

/// A parsed markup document. Dropping it releases the whole tree.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw response bytes. `source` is only used for error reporting.
    ///
    /// Bytes that are not UTF-8 are a parse failure. Markup errors are not: the parser always
    /// recovers and whatever tree it produced is used as is.
    pub fn parse(source: &str, bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::Parse {
            url: source.into(),
            reason: e.to_string(),
        })?;
        Ok(Self::parse_str(text))
    }

    pub fn parse_str(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// Root element of `section`, if the tree has one.
    pub fn section(&self, section: Section) -> Result<Option<ElementRef<'_>>> {
        let selector = create_selector(section.tag())?;
        Ok(self.html.select(&selector).next())
    }

    /// All `tag` elements below `section`, in document order.
    pub fn elements_by_tag(&self, section: Section, tag: &str) -> Result<Vec<ElementRef<'_>>> {
        let Some(root) = self.section(section)? else {
            return Ok(Vec::new());
        };
        let selector = create_selector(tag)?;
        Ok(root.select(&selector).collect())
    }
}

/// Value of attribute `name`, `None` when absent.
#[inline]
pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Concatenated text of every text node below `element`.
#[inline]
pub fn text_content(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Direct children of `element` that are elements, skipping text, comments and the like.
pub fn element_children<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}
