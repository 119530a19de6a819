pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils {
    pub mod config;
    pub mod env;
    pub mod profiling;
}

pub use application::LibraryStore;
pub use domain::book::{BookRecord, LibraryRepository, LibraryStats, YearInput};
pub use error::{LibraryError, Result};
