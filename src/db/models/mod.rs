//! Database models split into domain-specific modules.

pub mod ride;
pub mod user;

pub use ride::*;
pub use user::*;
