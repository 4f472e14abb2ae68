//! Conversion of note trees into `termtree` display trees.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::NoteTree;

/// Label used for the synthetic root in rendered output.
pub const ROOT_LABEL: &str = ".";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for NoteTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(notes: &NoteTree, idx: Index, parent_tree: &mut Tree<String>) {
            for (child_idx, child) in notes.children_of(idx) {
                let mut child_tree = Tree::new(child.to_string());
                build_tree(notes, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let mut tree = Tree::new(ROOT_LABEL.to_string());
        build_tree(self, self.root(), &mut tree);
        tree
    }
}
