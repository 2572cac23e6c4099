//! Ordered strategies for finding the metadata XML inside a TIFF.

use tracing::debug;

use crate::consts::OME_START_MARKER;
use crate::frame::PageText;
use crate::metadata::tree::MetadataTree;
use crate::metadata::xml::parse_xml;

/// One way of locating a metadata payload.
pub trait MetadataStrategy {
    fn name(&self) -> &'static str;

    /// Parsed tree when this strategy applies, `None` otherwise.
    fn locate(&self, page: &PageText) -> Option<MetadataTree>;
}

/// File-level OME-XML block (an OME document in the first page description).
pub struct FileOme;

/// Any XML document in the first page description, e.g. vendor XML.
pub struct PageDescriptionXml;

/// OME fragment embedded in the ImageJ `info` text.
///
/// Only consulted when the page has a description that did not parse as
/// XML; a page without any description has no metadata.
pub struct ImageJEmbeddedOme;

impl MetadataStrategy for FileOme {
    fn name(&self) -> &'static str {
        "file OME-XML"
    }

    fn locate(&self, page: &PageText) -> Option<MetadataTree> {
        let text = page.description.as_deref()?;
        if !is_ome_document(text) {
            return None;
        }
        parse_or_log(self.name(), text)
    }
}

impl MetadataStrategy for PageDescriptionXml {
    fn name(&self) -> &'static str {
        "page description XML"
    }

    fn locate(&self, page: &PageText) -> Option<MetadataTree> {
        let text = page.description.as_deref()?;
        parse_or_log(self.name(), text)
    }
}

impl MetadataStrategy for ImageJEmbeddedOme {
    fn name(&self) -> &'static str {
        "ImageJ embedded OME"
    }

    fn locate(&self, page: &PageText) -> Option<MetadataTree> {
        page.description.as_deref()?;
        let info = page.imagej_info.as_deref()?;
        let Some(start) = info.find(OME_START_MARKER) else {
            debug!(strategy = self.name(), "no OME marker in ImageJ info");
            return None;
        };
        parse_or_log(self.name(), &info[start..])
    }
}

/// Strategies in the order they are tried.
pub fn default_strategies() -> Vec<Box<dyn MetadataStrategy>> {
    vec![
        Box::new(FileOme),
        Box::new(PageDescriptionXml),
        Box::new(ImageJEmbeddedOme),
    ]
}

/// Try each strategy in order; the first that applies wins.
pub fn locate_metadata(
    page: &PageText,
    strategies: &[Box<dyn MetadataStrategy>],
) -> Option<(&'static str, MetadataTree)> {
    strategies
        .iter()
        .find_map(|s| s.locate(page).map(|tree| (s.name(), tree)))
}

fn is_ome_document(text: &str) -> bool {
    text.contains(OME_START_MARKER) && text.trim_end().ends_with("OME>")
}

fn parse_or_log(strategy: &'static str, text: &str) -> Option<MetadataTree> {
    match parse_xml(text) {
        Ok(tree) => Some(tree),
        Err(e) => {
            debug!(strategy, error = %e, "metadata payload did not parse");
            None
        }
    }
}
