/// Schema-less tree produced from an XML metadata payload.
///
/// Mappings keep document order. Attributes appear as `@name` keys until
/// [`MetadataTree::strip_attribute_markers`] is applied; mixed text content is
/// stored under `#text`. Repeated sibling elements collapse into a
/// [`MetadataTree::Sequence`] at the position of their first occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataTree {
    /// Element with neither attributes, children nor text.
    Null,
    Scalar(String),
    Mapping(Vec<(String, MetadataTree)>),
    Sequence(Vec<MetadataTree>),
}

impl MetadataTree {
    /// Depth-first search for the first value stored under `key`.
    ///
    /// Traversal is pre-order: inside a mapping each entry's key is compared
    /// before its value is descended into, and sequences are walked left to
    /// right. Entries whose value is [`MetadataTree::Null`] never match, so
    /// the search continues past them. Several fields with the same name at
    /// different depths resolve to whichever is visited first.
    pub fn find(&self, key: &str) -> Option<&MetadataTree> {
        match self {
            Self::Mapping(entries) => {
                for (k, v) in entries {
                    if k == key && !v.is_null() {
                        return Some(v);
                    }
                    if let Some(found) = v.find(key) {
                        return Some(found);
                    }
                }
                None
            }
            Self::Sequence(items) => items.iter().find_map(|item| item.find(key)),
            Self::Null | Self::Scalar(_) => None,
        }
    }

    /// Like [`find`](Self::find), returning the text of the match.
    ///
    /// A mapping match yields its `#text` content, if any.
    pub fn find_text(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(MetadataTree::text)
    }

    /// Text of a scalar, or the `#text` entry of a mapping.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s.as_str()),
            Self::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == "#text")
                .and_then(|(_, v)| v.text()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Remove leading `@` markers from every mapping key, recursively.
    pub fn strip_attribute_markers(self) -> MetadataTree {
        match self {
            Self::Mapping(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| {
                        (
                            k.trim_start_matches('@').to_string(),
                            v.strip_attribute_markers(),
                        )
                    })
                    .collect(),
            ),
            Self::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(MetadataTree::strip_attribute_markers)
                    .collect(),
            ),
            leaf => leaf,
        }
    }
}
