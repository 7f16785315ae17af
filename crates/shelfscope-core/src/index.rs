use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::artifact::SeasonArtifact;
use crate::dedupe::DuplicateIndex;
use crate::key::BookKey;

// ─── Book ───────────────────────────────────────────────────

/// A deduplicated book with its cross-achievement membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub cover: String,

    /// Achievement names this book appears under, lexicographically sorted.
    pub achievements: Vec<String>,

    /// Sourced from the artifact's dedupe section, never recomputed from
    /// `achievements`.
    pub is_duplicate: bool,
}

impl Book {
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }

    pub fn achievement_count(&self) -> usize {
        self.achievements.len()
    }
}

// ─── BookIndex ──────────────────────────────────────────────

/// Deduplicated view over every achievement's book list.
///
/// Rebuilt wholesale when a new season loads; immutable between rebuilds.
#[derive(Debug, Clone, Default)]
pub struct BookIndex {
    /// Books in first-seen key order.
    pub books: Vec<Book>,

    /// Sorted distinct achievement names across the artifact, for filter
    /// controls. Derived from the achievements themselves, so an achievement
    /// whose books were all dropped still appears here.
    pub achievement_names: Vec<String>,
}

impl BookIndex {
    /// Fold all achievements' book lists into one deduplicated index.
    ///
    /// Iteration follows artifact order. The first reference for a key seeds
    /// the book's title, author, link and cover; later references contribute
    /// only their achievement association. References without a title are
    /// dropped; they cannot be identified.
    pub fn build(artifact: &SeasonArtifact, duplicates: &DuplicateIndex) -> Self {
        let mut books: Vec<Book> = Vec::new();
        let mut positions: HashMap<BookKey, usize> = HashMap::new();
        let mut names: BTreeSet<String> = BTreeSet::new();

        for achievement in &artifact.achievements {
            names.insert(achievement.name.clone());

            for book_ref in &achievement.books {
                if book_ref.title.trim().is_empty() {
                    continue;
                }

                let position = *positions.entry(book_ref.key()).or_insert_with(|| {
                    books.push(Book {
                        title: book_ref.title.clone(),
                        author: book_ref.author.clone(),
                        link: book_ref.link.clone(),
                        cover: book_ref.cover.clone(),
                        achievements: Vec::new(),
                        is_duplicate: false,
                    });
                    books.len() - 1
                });

                let book = &mut books[position];
                if !book.achievements.contains(&achievement.name) {
                    book.achievements.push(achievement.name.clone());
                }
            }
        }

        for book in &mut books {
            book.achievements.sort();
            book.is_duplicate = duplicates.is_duplicate(&book.key());
        }

        Self {
            books,
            achievement_names: names.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Count of index books flagged duplicate.
    pub fn duplicate_count(&self) -> usize {
        self.books.iter().filter(|b| b.is_duplicate).count()
    }
}

// ─── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{Achievement, BookRef, DedupeSection, DuplicateGroup};

    fn book_ref(title: &str, author: &str) -> BookRef {
        BookRef {
            title: title.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }

    fn achievement(name: &str, books: Vec<BookRef>) -> Achievement {
        Achievement {
            name: name.to_string(),
            books,
            ..Default::default()
        }
    }

    fn build(achievements: Vec<Achievement>, dedupe: DedupeSection) -> BookIndex {
        let artifact = SeasonArtifact {
            achievements,
            dedupe,
            ..Default::default()
        };
        let duplicates = DuplicateIndex::from_section(&artifact.dedupe);
        BookIndex::build(&artifact, &duplicates)
    }

    #[test]
    fn test_same_key_collapses_to_one_book() {
        let index = build(
            vec![
                achievement("A", vec![book_ref("Dune", "Herman")]),
                achievement("B", vec![book_ref("dune", "herman")]),
                achievement("C", vec![book_ref(" DUNE ", "Herman")]),
            ],
            DedupeSection::default(),
        );

        assert_eq!(index.len(), 1);
        assert_eq!(index.books[0].achievements, ["A", "B", "C"]);
    }

    #[test]
    fn test_first_seen_values_win() {
        let mut second = book_ref("dune", "herman");
        second.link = "other-link".to_string();
        second.cover = "other-cover".to_string();

        let mut first = book_ref("Dune", "Herman");
        first.link = "first-link".to_string();

        let index = build(
            vec![achievement("A", vec![first]), achievement("B", vec![second])],
            DedupeSection::default(),
        );

        let book = &index.books[0];
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herman");
        assert_eq!(book.link, "first-link");
        assert_eq!(book.cover, "");
    }

    #[test]
    fn test_untitled_refs_are_dropped() {
        let index = build(
            vec![achievement(
                "A",
                vec![book_ref("", "Ghost"), book_ref("   ", "Ghost"), book_ref("Real", "")],
            )],
            DedupeSection::default(),
        );

        assert_eq!(index.len(), 1);
        assert_eq!(index.books[0].title, "Real");
    }

    #[test]
    fn test_achievements_are_sorted_not_insertion_ordered() {
        let index = build(
            vec![
                achievement("Zeta", vec![book_ref("Dune", "")]),
                achievement("Alpha", vec![book_ref("Dune", "")]),
            ],
            DedupeSection::default(),
        );

        assert_eq!(index.books[0].achievements, ["Alpha", "Zeta"]);
    }

    #[test]
    fn test_duplicate_flag_comes_from_dedupe_section_only() {
        // Appears under two achievements but absent from the dedupe section:
        // never flagged.
        let index = build(
            vec![
                achievement("A", vec![book_ref("Dune", "Herman")]),
                achievement("B", vec![book_ref("Dune", "Herman")]),
            ],
            DedupeSection::default(),
        );
        assert!(!index.books[0].is_duplicate);
        assert_eq!(index.duplicate_count(), 0);

        let index = build(
            vec![
                achievement("A", vec![book_ref("Dune", "Herman")]),
                achievement("B", vec![book_ref("Dune", "Herman")]),
            ],
            DedupeSection {
                duplicates_by_title_author: vec![DuplicateGroup {
                    title: "Dune".to_string(),
                    author: "Herman".to_string(),
                    achievements: vec!["A".to_string(), "B".to_string()],
                }],
            },
        );
        assert!(index.books[0].is_duplicate);
        assert_eq!(index.duplicate_count(), 1);
    }

    #[test]
    fn test_round_trip_scenario() {
        let index = build(
            vec![
                achievement("A", vec![book_ref("Dune", "Herman")]),
                achievement("B", vec![book_ref("dune", "herman")]),
            ],
            DedupeSection {
                duplicates_by_title_author: vec![DuplicateGroup {
                    title: "Dune".to_string(),
                    author: "Herman".to_string(),
                    achievements: vec!["A".to_string(), "B".to_string()],
                }],
            },
        );

        assert_eq!(index.len(), 1);
        let book = &index.books[0];
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herman");
        assert_eq!(book.achievements, ["A", "B"]);
        assert!(book.is_duplicate);
    }

    #[test]
    fn test_achievement_names_cover_bookless_achievements() {
        let index = build(
            vec![
                achievement("Emptied", vec![book_ref("", "dropped")]),
                achievement("Full", vec![book_ref("Dune", "")]),
            ],
            DedupeSection::default(),
        );

        assert_eq!(index.achievement_names, ["Emptied", "Full"]);
    }

    #[test]
    fn test_empty_artifact_builds_empty_index() {
        let index = build(vec![], DedupeSection::default());
        assert!(index.is_empty());
        assert!(index.achievement_names.is_empty());
    }
}
