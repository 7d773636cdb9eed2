mod layer;
mod section;

pub use layer::{LayerAttributes, LayerCollection, LayerKind};
pub use section::{Entry, Section, SectionId, ATTACHMENT_PREFIX, PRIMARY_SECTION};
