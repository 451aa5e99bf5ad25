//! Shared utilities

pub mod path;

pub use path::{posix_relative, to_posix};
