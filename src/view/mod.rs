//! Host-facing presentation: render records and theme descriptors.

pub mod render;
pub mod theme;

pub use render::LineRecord;
pub use theme::{Color, TextStyle, Theme};
