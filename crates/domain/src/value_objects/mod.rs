//! Value objects - Immutable objects defined by their attributes

mod lookup;
mod reference_key;
mod reference_tag;

pub use lookup::{ReferenceLookup, ResolvedReference};
pub use reference_key::{names_match, normalize_name, ReferenceKey};
pub use reference_tag::{
    contains_tags, parse_reference_tags, split_segments, FormatTag, ReferenceTag, TagType,
};
