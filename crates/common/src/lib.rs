//! Pieces shared by every crate in the workspace: logging bootstrap and
//! small response types.

pub mod types;
pub mod utils;
