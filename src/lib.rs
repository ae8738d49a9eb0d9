pub mod changes;
pub mod cli;
pub mod config;
pub mod crosslink;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod render;
pub mod ui;
pub mod warning;

pub use error::{ChangelogError, Result};
