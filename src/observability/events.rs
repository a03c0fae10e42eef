//! Action tags for docstore log lines
//!
//! Every core operation logs one line carrying an `action` field so that a
//! log can be filtered by what happened, independent of the message text.

use std::fmt;

/// Observable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A collection container was created by its first write
    Creation,
    /// A document was appended
    Add,
    /// A document or collection was read
    Retrieval,
    /// A document was merged with updates
    Update,
    /// A document was removed
    Delete,
    /// An index entry was written or looked up
    Index,
    /// A predicate was evaluated over a collection
    Query,
    /// A lookup or mutation found nothing, or an operation failed
    Error,
}

impl Action {
    /// Returns the tag written to the `action` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Creation => "CREATION",
            Action::Add => "ADD",
            Action::Retrieval => "RETRIEVAL",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::Index => "INDEX",
            Action::Query => "QUERY",
            Action::Error => "ERROR",
        }
    }

    /// Mutating actions rewrite a container
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Action::Creation | Action::Add | Action::Update | Action::Delete
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
