//! Arena DOM for article fragments.
//!
//! `sink` feeds html5ever's tokenizer output into an [`ArenaDom`]; the
//! sanitizer then edits the arena in place and serializes it back out.

mod arena;
mod sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, Children};
pub use sink::{ArenaTokenSink, VOID_ELEMENTS, is_void, parse_fragment};
