//! Path ACLs separating the trusted and public listeners
//!
//! Provides:
//! - Ordered regex pattern sets with unanchored matching
//! - Allow-list polarity for the internal listener
//! - Deny-list polarity for the external listener

pub mod lists;
mod matcher;
mod perimeter;

pub use matcher::PathMatcher;
pub use perimeter::{Listener, Perimeter};
