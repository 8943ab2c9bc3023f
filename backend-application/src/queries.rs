// Read-side use cases

pub mod event_queries;

pub use event_queries::*;
