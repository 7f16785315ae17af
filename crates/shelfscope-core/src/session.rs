use std::collections::BTreeMap;

use crate::artifact::SeasonArtifact;
use crate::dedupe::DuplicateIndex;
use crate::filter::{FilterState, apply_filters};
use crate::index::{Book, BookIndex};
use crate::sort::{SortState, sort_books};

// ─── ViewMode ───────────────────────────────────────────────

/// How the render adapter lays out the visible rows. Pass-through for the
/// engine; only the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    /// Parse a stored or user-supplied value, falling back to `List`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grid" => Self::Grid,
            _ => Self::List,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }
}

// ─── Session ────────────────────────────────────────────────

/// One loaded season plus the user-controlled view state.
///
/// The caller owns the session and hands it to the renderer; the engine
/// functions underneath stay pure. The book index is rebuilt only by
/// `load`, never touched by queries.
#[derive(Debug, Clone, Default)]
pub struct Session {
    artifact: SeasonArtifact,
    index: BookIndex,

    pub filter: FilterState,
    pub sort: SortState,
    pub view: ViewMode,
}

impl Session {
    pub fn new(artifact: SeasonArtifact) -> Self {
        let mut session = Self::default();
        session.load(artifact);
        session
    }

    /// Swap in a newly loaded artifact, rebuilding the index wholesale.
    /// Filter, sort and view state survive the reload.
    pub fn load(&mut self, artifact: SeasonArtifact) {
        let duplicates = DuplicateIndex::from_section(&artifact.dedupe);
        self.index = BookIndex::build(&artifact, &duplicates);
        self.artifact = artifact;
    }

    pub fn artifact(&self) -> &SeasonArtifact {
        &self.artifact
    }

    pub fn index(&self) -> &BookIndex {
        &self.index
    }

    pub fn achievement_names(&self) -> &[String] {
        &self.index.achievement_names
    }

    /// Evaluate the current filter and sort state against the index.
    pub fn query(&self) -> QueryOutput {
        let visible = apply_filters(&self.index.books, &self.filter);

        let duplicate_count = visible.iter().filter(|b| b.is_duplicate).count();

        // Tallied over the filtered, pre-sort set: annotates each achievement
        // with how many of its books are currently visible.
        let mut achievement_counts: BTreeMap<String, usize> = BTreeMap::new();
        for book in &visible {
            for name in &book.achievements {
                *achievement_counts.entry(name.clone()).or_insert(0) += 1;
            }
        }

        let rows = sort_books(&visible, &self.sort);

        QueryOutput {
            rows,
            duplicate_count,
            achievement_counts,
            achievement_names: self.index.achievement_names.clone(),
            view: self.view,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    /// Filtered and sorted books.
    pub rows: Vec<Book>,

    /// Duplicates among the *filtered* set, for status display.
    pub duplicate_count: usize,

    /// Achievement name → count of currently visible books carrying it.
    pub achievement_counts: BTreeMap<String, usize>,

    /// Sorted distinct achievement names, for filter controls.
    pub achievement_names: Vec<String>,

    pub view: ViewMode,
}

impl QueryOutput {
    /// Visible count for one achievement; absent means zero.
    pub fn visible_in(&self, achievement: &str) -> usize {
        self.achievement_counts.get(achievement).copied().unwrap_or(0)
    }
}

// ─── Tests ──────────────────────────────────────────────────
