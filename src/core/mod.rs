//! Core implementation

pub mod acl;
pub mod auth;
pub mod config;
pub mod encryption;
pub mod error;
pub mod gatekeeper;
pub mod policy;
pub mod token;
