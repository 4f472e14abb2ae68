//! crumbs: turn indented outlines into note trees.
//!
//! Every line indented by at least two spaces becomes an entry; two spaces
//! make one level. A leading `[[name]]` marker becomes the entry's icon.
//!
//! ```
//! use crumbs::domain::parse_lines;
//!
//! let tree = parse_lines(["  [[cat]] Pets", "    Tom", "  Chores"], "/img", "png").unwrap();
//! let top: Vec<_> = tree.children_of(tree.root()).map(|(_, e)| e.text()).collect();
//! assert_eq!(top, vec![" Pets", "Chores"]);
//! assert_eq!(tree.leaf_nodes(), vec!["Tom".to_string(), "Chores".to_string()]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{parse_lines, Entry, NoteTree, TreeBuilder};
