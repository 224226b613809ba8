//! Terminal rendering for the chat widget.

mod render;
pub mod text;
mod theme;
mod transcript;

pub use render::render;
pub use theme::Theme;
pub use transcript::TranscriptView;
