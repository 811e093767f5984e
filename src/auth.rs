//! Relying-party credential and scope models.

pub mod scope;
pub mod secret;

pub use scope::*;
pub use secret::*;
