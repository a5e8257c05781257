pub mod arguments;
pub mod bumper;
pub mod error;
pub mod git;
pub mod guard;
pub mod parsers;
pub mod project;
pub mod runner;
pub mod version;

pub use error::{BumpError, Result};
