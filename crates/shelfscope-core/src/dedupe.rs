use std::collections::HashMap;

use crate::artifact::DedupeSection;
use crate::key::BookKey;

/// Lookup of normalized (title, author) key → achievement names, taken from
/// the artifact's precomputed dedupe section.
///
/// This is the sole authority on duplicate membership: the book index never
/// recomputes duplicates from the achievement lists, it only consults this
/// structure.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    groups: HashMap<BookKey, Vec<String>>,
}

impl DuplicateIndex {
    /// Build the index from the dedupe section. Total: an absent or empty
    /// section yields an empty index.
    pub fn from_section(section: &DedupeSection) -> Self {
        let mut groups: HashMap<BookKey, Vec<String>> = HashMap::new();

        for group in &section.duplicates_by_title_author {
            let key = BookKey::new(&group.title, &group.author);
            let names = groups.entry(key).or_default();
            for name in &group.achievements {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }

        Self { groups }
    }

    /// Distinct achievement names recorded for a key, in artifact order.
    /// Only consulted for the duplicate decision; the names themselves are
    /// not part of the public surface.
    fn achievements(&self, key: &BookKey) -> &[String] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A key is a duplicate when the dedupe section ties it to at least two
    /// distinct achievement names.
    pub fn is_duplicate(&self, key: &BookKey) -> bool {
        self.achievements(key).len() >= 2
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DuplicateGroup;

    fn section(groups: Vec<DuplicateGroup>) -> DedupeSection {
        DedupeSection {
            duplicates_by_title_author: groups,
        }
    }

    fn group(title: &str, author: &str, achievements: &[&str]) -> DuplicateGroup {
        DuplicateGroup {
            title: title.to_string(),
            author: author.to_string(),
            achievements: achievements.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_section_yields_empty_index() {
        let index = DuplicateIndex::from_section(&DedupeSection::default());
        assert!(index.is_empty());
        assert!(!index.is_duplicate(&BookKey::new("Dune", "Herbert")));
    }

    #[test]
    fn test_two_achievements_flag_duplicate() {
        let index = DuplicateIndex::from_section(&section(vec![group(
            "Dune",
            "Frank Herbert",
            &["A", "B"],
        )]));
        assert!(index.is_duplicate(&BookKey::new("dune", "frank herbert")));
        assert!(index.is_duplicate(&BookKey::new(" DUNE ", "Frank Herbert")));
    }

    #[test]
    fn test_single_achievement_group_is_not_duplicate() {
        let index =
            DuplicateIndex::from_section(&section(vec![group("Emma", "Jane Austen", &["A"])]));
        assert!(!index.is_duplicate(&BookKey::new("Emma", "Jane Austen")));
    }

    #[test]
    fn test_repeated_names_count_once() {
        let index = DuplicateIndex::from_section(&section(vec![group(
            "Emma",
            "Jane Austen",
            &["A", "A"],
        )]));
        assert!(!index.is_duplicate(&BookKey::new("Emma", "Jane Austen")));
        assert_eq!(index.achievements(&BookKey::new("Emma", "Jane Austen")), ["A"]);
    }

    #[test]
    fn test_split_groups_for_same_key_merge() {
        let index = DuplicateIndex::from_section(&section(vec![
            group("Emma", "Jane Austen", &["A"]),
            group("emma", "JANE AUSTEN", &["B"]),
        ]));
        assert!(index.is_duplicate(&BookKey::new("Emma", "Jane Austen")));
        assert_eq!(index.len(), 1);
    }
}
