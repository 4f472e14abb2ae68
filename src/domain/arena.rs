use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Level of the synthetic root, above any real depth.
pub const ROOT_LEVEL: i32 = -1;

/// A single note in the outline tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: String,
    text: String,
    level: i32,
    icon: Option<String>,
    /// Index of parent entry in the arena, None for the root
    parent: Option<Index>,
    /// Indices of child entries, in source order
    children: Vec<Index>,
}

impl Entry {
    pub(crate) fn new(id: String, level: i32, text: String) -> Self {
        Self {
            id,
            text,
            level,
            icon: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn root(id: String) -> Self {
        Self::new(id, ROOT_LEVEL, String::new())
    }

    pub(crate) fn set_icon(&mut self, icon: String, text: String) {
        self.icon = Some(icon);
        self.text = text;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.icon {
            Some(icon) => write!(f, "{} [{}]", self.text.trim(), icon),
            None => write!(f, "{}", self.text),
        }
    }
}

/// Arena-backed note tree produced by one parse.
///
/// Entries are owned by the arena. Parents are plain indices, so there are
/// no ownership cycles; children keep insertion order.
#[derive(Debug)]
pub struct NoteTree {
    arena: Arena<Entry>,
    root: Index,
}

impl NoteTree {
    /// Creates a tree holding only the root entry.
    pub(crate) fn new(root_id: String) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Entry::root(root_id));
        Self { arena, root }
    }

    /// Appends `entry` as the last child of `parent`.
    #[instrument(level = "trace", skip(self, entry), fields(id = %entry.id))]
    pub(crate) fn attach(&mut self, mut entry: Entry, parent: Index) -> Index {
        entry.parent = Some(parent);
        let idx = self.arena.insert(entry);
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(idx);
        }
        idx
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_entry(&self) -> &Entry {
        &self.arena[self.root]
    }

    pub fn get(&self, idx: Index) -> Option<&Entry> {
        self.arena.get(idx)
    }

    pub fn parent_of(&self, idx: Index) -> Option<&Entry> {
        self.get(idx)?.parent.and_then(|p| self.get(p))
    }

    /// Child entries of `idx` in source order.
    pub fn children_of(&self, idx: Index) -> impl Iterator<Item = (Index, &Entry)> + '_ {
        self.get(idx)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&c| self.get(c).map(|e| (c, e)))
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when nothing was attached below the root.
    pub fn is_empty(&self) -> bool {
        self.root_entry().children.is_empty()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Levels on the longest root-to-leaf path; the root alone counts as one.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        match self.get(idx) {
            Some(entry) => {
                1 + entry
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Texts of all entries without children, left to right.
    ///
    /// A tree with nothing below the root has no leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, e)| !e.is_root() && e.is_leaf())
            .map(|(_, e)| e.text.clone())
            .collect()
    }

    /// Texts from the topmost real ancestor down to `idx`.
    pub fn path_to(&self, idx: Index) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self.get(idx);
        while let Some(entry) = current {
            if entry.is_root() {
                break;
            }
            path.push(entry.text.as_str());
            current = entry.parent.and_then(|p| self.get(p));
        }
        path.reverse();
        path
    }
}

/// Pre-order traversal, root first, children left to right.
pub struct TreeIterator<'a> {
    tree: &'a NoteTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a NoteTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(entry) = self.tree.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(entry.children.iter().rev());
                return Some((current_idx, entry));
            }
        }
        None
    }
}

/// Post-order traversal, children before their parent.
pub struct PostOrderIterator<'a> {
    tree: &'a NoteTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a NoteTree) -> Self {
        Self {
            tree,
            stack: vec![(tree.root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(entry) = self.tree.get(current_idx) {
                if visited {
                    return Some((current_idx, entry));
                }
                self.stack.push((current_idx, true));
                for &child in entry.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
