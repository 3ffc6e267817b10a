//! Working with many Rill files at once.
//!
//! Every file becomes an independent [`ProcessedSource`](crate::source::ProcessedSource);
//! nothing is shared between them.

pub mod file_loader;

pub use file_loader::{
    ProcessedFiles, collect_file_paths, has_rill_extension, process_directory, process_files,
};
