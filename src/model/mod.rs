//! Document model: the counted-tree buffer and the selection collection.

pub mod selection;
pub mod static_vec;
pub mod text_buffer;
pub mod tree;

pub use selection::{Selection, Selections};
pub use text_buffer::{ByteComp, CodepointComp, LineComp, TextBuffer, TextInfo};
pub use tree::{Tree, TreeComp, TreeInfo};
