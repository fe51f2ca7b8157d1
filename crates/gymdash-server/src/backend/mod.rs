//! Typed client for the remote gym REST backend.

mod client;
mod error;

pub use client::{BackendClient, SignIn};
#[cfg(test)]
pub use client::AUTH_HEADER;
pub use error::{BackendError, BackendResult};
