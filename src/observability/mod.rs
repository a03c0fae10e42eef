//! Observability for docstore
//!
//! Logging is a side concern: nothing here changes the outcome of an
//! operation.
//!
//! # Usage
//!
//! ```ignore
//! use docstore::observability::{init_tracing, Action};
//!
//! init_tracing(&config.log);
//! tracing::info!(action = %Action::Add, collection = "cars", id = "1", "document added");
//! ```

mod events;
mod subscriber;

pub use events::Action;
pub use subscriber::init_tracing;
