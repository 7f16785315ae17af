/// Case-insensitive, whitespace-trimmed (title, author) identity.
///
/// Two book references are the same book iff their keys are equal. The
/// constructor is total: missing fields arrive as empty strings and an empty
/// author is a valid key component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookKey {
    pub title: String,
    pub author: String,
}

impl BookKey {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: normalize(title),
            author: normalize(author),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_case_and_whitespace() {
        assert_eq!(
            BookKey::new("  Dune ", "Frank Herbert"),
            BookKey::new("dune", "  FRANK HERBERT")
        );
    }

    #[test]
    fn test_key_distinguishes_authors() {
        assert_ne!(BookKey::new("Dune", "Herbert"), BookKey::new("Dune", ""));
    }

    #[test]
    fn test_key_empty_author_is_valid() {
        let key = BookKey::new("Dune", "");
        assert_eq!(key.author, "");
        assert_eq!(key.title, "dune");
    }
}
