//! Outline service: reads outline input and builds note trees.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{IconResolver, IdGenerator, NoteTree, TreeBuilder};

/// Parses outlines from files or readers using the configured icon options.
#[derive(Debug, Clone)]
pub struct OutlineService {
    settings: Settings,
}

impl OutlineService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    fn builder(&self) -> TreeBuilder {
        TreeBuilder::new(IconResolver::new(
            self.settings.images_path.clone(),
            self.settings.images_suffix.clone(),
        ))
    }

    /// Parse an outline file (UTF-8).
    #[instrument(level = "debug", skip(self))]
    pub fn parse_file(&self, path: &Path) -> ApplicationResult<NoteTree> {
        let content = fs::read_to_string(path).with_path_context("read outline", path)?;
        debug!(bytes = content.len(), "outline loaded");
        self.parse_str(&content)
    }

    /// Parse all lines available from `reader`.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> ApplicationResult<NoteTree> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("read outline: {e}"),
                source: Box::new(e),
            })?;
        self.parse_lines(&lines)
    }

    /// Parse outline text already held in memory.
    pub fn parse_str(&self, content: &str) -> ApplicationResult<NoteTree> {
        self.parse_lines(content.lines())
    }

    fn parse_lines<I, S>(&self, lines: I) -> ApplicationResult<NoteTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = IdGenerator::default();
        Ok(self.builder().build(lines, &mut ids)?)
    }
}
