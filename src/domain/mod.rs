//! Domain layer: outline parsing and the note tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod depth;
pub mod error;
pub mod icon;
pub mod id;

pub use arena::{Entry, NoteTree, PostOrderIterator, TreeIterator, ROOT_LEVEL};
pub use builder::{parse_lines, TreeBuilder};
pub use depth::depth;
pub use error::{DomainError, IdError, TreeResult};
pub use icon::IconResolver;
pub use id::IdGenerator;
