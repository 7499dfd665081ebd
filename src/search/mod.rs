//! Inline search routing
//!
//! Turns inline-query text into an answer using the client registry.

mod router;

pub use router::{DropReason, QueryOutcome, QueryRouter};
