//! Result types handed to the chat connector

mod types;

pub use types::*;
