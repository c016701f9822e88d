//! Collection index infrastructure.
//!
//! Two independently-lazy indices map identifiers to image URLs: the
//! metadata index (built from the first usable metadata document) and the
//! secondary index (a flat object published alongside the images). Both
//! are built at most once per process.

pub mod metadata;
pub mod parse;
pub mod secondary;
#[cfg(test)]
pub mod testing;

pub use metadata::MetadataIndexLoader;
pub use parse::{ipfs_to_https, parse_index_document, pick_id, pick_image};
pub use secondary::SecondaryIndexLoader;
