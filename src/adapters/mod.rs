// Adapters layer: boundary codecs for the line-oriented batch protocol.

pub mod input;
pub mod output;

pub use input::parse_batch;
pub use output::render;
