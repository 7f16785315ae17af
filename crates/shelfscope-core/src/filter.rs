use std::collections::BTreeSet;

use crate::index::Book;

// ─── FilterState ────────────────────────────────────────────

/// Selection semantics when more than one achievement is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AchievementMode {
    /// Book passes with at least one selected achievement.
    #[default]
    Any,
    /// Book must carry every selected achievement.
    All,
}

impl AchievementMode {
    /// Parse a stored or user-supplied value, falling back to `Any`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Self::All,
            _ => Self::Any,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Any => Self::All,
            Self::All => Self::Any,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for AchievementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User-controlled filter settings. All active predicates are ANDed.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Free-text query; blank disables the search predicate.
    pub search: String,

    pub duplicates_only: bool,

    /// Achievement names the user has checked. Empty means no achievement
    /// filtering, and `achievement_mode` is ignored.
    pub selected_achievements: BTreeSet<String>,

    pub achievement_mode: AchievementMode,
}

impl FilterState {
    /// Whether a single book passes every active predicate.
    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book) && self.matches_duplicates(book) && self.matches_selection(book)
    }

    fn matches_search(&self, book: &Book) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        book.title.to_lowercase().contains(&query)
            || book.author.to_lowercase().contains(&query)
            || book
                .achievements
                .iter()
                .any(|name| name.to_lowercase().contains(&query))
    }

    fn matches_duplicates(&self, book: &Book) -> bool {
        !self.duplicates_only || book.is_duplicate
    }

    fn matches_selection(&self, book: &Book) -> bool {
        if self.selected_achievements.is_empty() {
            return true;
        }
        match self.achievement_mode {
            AchievementMode::Any => book
                .achievements
                .iter()
                .any(|name| self.selected_achievements.contains(name)),
            AchievementMode::All => self
                .selected_achievements
                .iter()
                .all(|name| book.achievements.contains(name)),
        }
    }
}

/// Visible subset of `books` under `state`, preserving relative order.
/// Pure: identical inputs yield identical output.
pub fn apply_filters(books: &[Book], state: &FilterState) -> Vec<Book> {
    books.iter().filter(|b| state.matches(b)).cloned().collect()
}

// ─── Tests ──────────────────────────────────────────────────
