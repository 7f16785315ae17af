//! Shelfscope core — season artifact hydration, book deduplication, filter/sort.

pub mod artifact;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod index;
pub mod key;
pub mod session;
pub mod sort;

pub use artifact::{Achievement, BookRef, DedupeSection, DuplicateGroup, SeasonArtifact, SeasonMeta};
pub use config::{AppConfig, SourceConfig, UiConfig};
pub use dedupe::DuplicateIndex;
pub use error::{Result, ShelfscopeError};
pub use filter::{AchievementMode, FilterState, apply_filters};
pub use index::{Book, BookIndex};
pub use key::BookKey;
pub use session::{QueryOutput, Session, ViewMode};
pub use sort::{SortDirection, SortField, SortState, sort_books};
