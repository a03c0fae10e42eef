//! Query Filter subsystem for docstore
//!
//! Evaluates a single `field <op> value` comparison against every document
//! of one collection.
//!
//! # Supported Operators
//!
//! - `>` greater than
//! - `<` less than
//! - `==` equal
//!
//! Anything else yields no matches rather than an error. There are no
//! compound predicates, projections, sorting or pagination.

mod filter;
mod operator;
mod predicate;

pub use filter::QueryFilter;
pub use operator::Operator;
pub use predicate::Predicate;
