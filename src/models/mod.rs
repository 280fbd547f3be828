//! Data models for the teacher management portal.
//!
//! These models serialize with the same camelCase shape the portal front end uses.

mod filter;
mod seed;
mod teacher;

pub use filter::*;
pub use seed::*;
pub use teacher::*;
