// Variant generation - decodes a source image and produces the fixed set of
// derivative renditions. Pure transformation, no I/O.
pub mod error;
pub mod formats;
mod normalize;
mod resize;
pub mod types;
mod variants;

pub use error::ProcessorError;
pub use types::{OutputFormat, Rendition, ThumbnailSpec, VariantConfig, VariantSpec};
pub use variants::generate;
