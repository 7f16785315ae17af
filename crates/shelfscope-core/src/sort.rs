use std::cmp::Ordering;

use crate::index::Book;

// ─── Sort state ─────────────────────────────────────────────

/// Primary sort key for the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    Author,
    AchievementCount,
}

impl SortField {
    /// Parse a stored or user-supplied value, falling back to `Title`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "author" => Self::Author,
            "achievements" | "achievement_count" | "count" => Self::AchievementCount,
            _ => Self::Title,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::AchievementCount,
            Self::AchievementCount => Self::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::AchievementCount => "achievements",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a stored or user-supplied value, falling back to `Asc`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

// ─── Sorting ────────────────────────────────────────────────

/// Fresh ordering of `books` under `state`; the input is left untouched.
///
/// The direction reverses the whole comparison, tie-break included, so a
/// descending sort is the exact mirror of the ascending one. The underlying
/// sort is stable.
pub fn sort_books(books: &[Book], state: &SortState) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, state.field);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Primary key per field; ties fall back to a secondary key so equal rows
/// keep a deterministic order.
fn compare(a: &Book, b: &Book, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title).then_with(|| a.author.cmp(&b.author)),
        SortField::Author => a.author.cmp(&b.author).then_with(|| a.title.cmp(&b.title)),
        SortField::AchievementCount => a
            .achievements
            .len()
            .cmp(&b.achievements.len())
            .then_with(|| a.title.cmp(&b.title)),
    }
}

// ─── Tests ──────────────────────────────────────────────────
