pub mod canonical;
pub mod locate;
pub mod objective;
pub mod timestamp;
pub mod tree;
pub mod well;
pub mod xml;

pub use canonical::{extract_from_stack, extract_metadata, CanonicalImageMetadata};
pub use tree::MetadataTree;
