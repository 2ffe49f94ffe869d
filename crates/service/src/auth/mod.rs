//! Auth module: login against stored employee credentials and bearer token
//! issue/verification.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::{AuthConfig, AuthService};
