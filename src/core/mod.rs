//! Core matching primitives: script model, normalization, chunking,
//! candidate selection.

pub mod candidates;
pub mod chunks;
pub mod script;
pub mod text_normalizer;

pub use candidates::get_candidates;
pub use chunks::{generate_chunks, Chunk, DEFAULT_WINDOW_SIZE};
pub use script::{load_sections, validate_sections, Section};
pub use text_normalizer::normalize;
