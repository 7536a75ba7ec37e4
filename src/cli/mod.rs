//! CLI operation handlers.
//!
//! - [`commenters`]: Fetch the commenters of every pull request in a list

pub mod commenters;
