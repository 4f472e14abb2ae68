//! Tree builder turning indented outline lines into a [`NoteTree`].

use std::path::PathBuf;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Entry, NoteTree, ROOT_LEVEL};
use crate::domain::depth::depth;
use crate::domain::error::TreeResult;
use crate::domain::icon::IconResolver;
use crate::domain::id::IdGenerator;

/// Builds note trees from outline lines in a single pass.
///
/// Each line indented by at least one level becomes an entry. Its parent is
/// the nearest preceding entry with a strictly smaller level; the root
/// (level -1) catches everything else. Lines that are blank or not indented
/// are skipped.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    icons: IconResolver,
}

impl TreeBuilder {
    pub fn new(icons: IconResolver) -> Self {
        Self { icons }
    }

    /// Builds a tree from `lines`, drawing every id from `ids`.
    ///
    /// # Errors
    /// Fails on the first id that cannot be generated, including the root's.
    /// No partial tree is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I, S>(&self, lines: I, ids: &mut IdGenerator) -> TreeResult<NoteTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = NoteTree::new(ids.next_id()?);

        // cursor: most recently attached entry and its level
        let mut node = tree.root();
        let mut node_depth = ROOT_LEVEL;

        for (lineno, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            let child_depth = depth(line);
            if child_depth == 0 {
                trace!(lineno, "skipping unindented line");
                continue;
            }
            let child_depth = i32::try_from(child_depth).unwrap_or(i32::MAX);

            let mut child = Entry::new(ids.next_id()?, child_depth, line.trim().to_string());
            self.icons.enrich(&mut child);

            let parent = if child_depth > node_depth {
                node
            } else {
                ancestor_below(&tree, node, child_depth)
            };

            node = tree.attach(child, parent);
            node_depth = child_depth;
            trace!(lineno, level = child_depth, "attached entry");
        }

        debug!(entries = tree.len(), "outline parsed");
        Ok(tree)
    }
}

/// Walks up from `start` to the first ancestor whose level is below `level`.
fn ancestor_below(tree: &NoteTree, start: Index, level: i32) -> Index {
    let mut current = start;
    while let Some(entry) = tree.get(current) {
        if entry.level() < level {
            break;
        }
        match entry.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Parses `lines` with a fresh default id generator.
///
/// `images_suffix` is appended to icon paths as an extension when non-empty.
pub fn parse_lines<I, S>(
    lines: I,
    images_path: impl Into<PathBuf>,
    images_suffix: impl Into<String>,
) -> TreeResult<NoteTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let builder = TreeBuilder::new(IconResolver::new(images_path, images_suffix));
    builder.build(lines, &mut IdGenerator::default())
}
