//! Admin credential checks and sealed token lifecycle

mod authenticator;
mod password;

pub use authenticator::Authenticator;
pub use password::{hash_password, AdminPassword};
