use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, SimaError};
use crate::metadata::tree::MetadataTree;

/// Element being assembled while its children are still being read.
struct ElementBuilder {
    name: String,
    entries: Vec<(String, MetadataTree)>,
    text: String,
}

impl ElementBuilder {
    fn new(e: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut entries = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value()?.into_owned();
            entries.push((key, MetadataTree::Scalar(value)));
        }
        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    /// Add a child element. Repeated names become a sequence in place.
    fn push_child(&mut self, name: String, value: MetadataTree) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, MetadataTree::Sequence(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, MetadataTree::Null);
                *existing = MetadataTree::Sequence(vec![first, value]);
            }
            None => self.entries.push((name, value)),
        }
    }

    fn finish(mut self) -> (String, MetadataTree) {
        let text = self.text.trim();
        let tree = if self.entries.is_empty() {
            if text.is_empty() {
                MetadataTree::Null
            } else {
                MetadataTree::Scalar(text.to_string())
            }
        } else {
            if !text.is_empty() {
                self.entries
                    .push(("#text".to_string(), MetadataTree::Scalar(text.to_string())));
            }
            MetadataTree::Mapping(self.entries)
        };
        (self.name, tree)
    }
}

/// Parse an XML document into a [`MetadataTree`] rooted at a one-entry
/// mapping `{root_name: root_tree}`.
///
/// The document must contain exactly one root element and no text outside
/// it; anything else is reported as [`SimaError::MalformedXml`].
pub fn parse_xml(text: &str) -> Result<MetadataTree> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<ElementBuilder> = Vec::new();
    let mut root: Option<(String, MetadataTree)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                ensure_single_root(&stack, &root)?;
                stack.push(ElementBuilder::new(&e)?);
            }
            Event::Empty(e) => {
                ensure_single_root(&stack, &root)?;
                let (name, tree) = ElementBuilder::new(&e)?.finish();
                attach(&mut stack, &mut root, name, tree);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SimaError::MalformedXml("unexpected closing tag".into()))?;
                let (name, tree) = element.finish();
                attach(&mut stack, &mut root, name, tree);
            }
            Event::Text(t) => {
                let content = t.unescape()?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(c) => {
                let content = String::from_utf8_lossy(&c).into_owned();
                push_text(&mut stack, &content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SimaError::MalformedXml(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    let (name, tree) =
        root.ok_or_else(|| SimaError::MalformedXml("document has no root element".into()))?;
    Ok(MetadataTree::Mapping(vec![(name, tree)]))
}

fn ensure_single_root(
    stack: &[ElementBuilder],
    root: &Option<(String, MetadataTree)>,
) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(SimaError::MalformedXml(
            "content after the root element".into(),
        ));
    }
    Ok(())
}

fn attach(
    stack: &mut [ElementBuilder],
    root: &mut Option<(String, MetadataTree)>,
    name: String,
    tree: MetadataTree,
) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, tree),
        None => *root = Some((name, tree)),
    }
}

fn push_text(stack: &mut [ElementBuilder], content: &str) -> Result<()> {
    match stack.last_mut() {
        Some(element) => element.text.push_str(content),
        None if !content.trim().is_empty() => {
            return Err(SimaError::MalformedXml(
                "text outside the root element".into(),
            ))
        }
        None => {}
    }
    Ok(())
}
