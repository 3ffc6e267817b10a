//! Discover Rill files on disk and process them in parallel.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::base::constants::RILL_EXT;
use crate::error::SourceError;
use crate::source::{ParseOptions, ProcessedSource};

/// Results keyed by path, in the order the paths were given
pub type ProcessedFiles = IndexMap<PathBuf, Result<ProcessedSource, SourceError>>;

/// Whether `path` has the `.rill` extension
pub fn has_rill_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(RILL_EXT)
}

/// Collect every `.rill` file under `dir`, sorted by path.
pub fn collect_file_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, SourceError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SourceError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && has_rill_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Process each path independently, in parallel.
pub fn process_files(paths: &[PathBuf], options: &ParseOptions) -> ProcessedFiles {
    debug!("[PROJECT] processing {} files", paths.len());
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result =
                ProcessedSource::from_file(path, options.language_version, options.engine);
            (path.clone(), result)
        })
        .collect();

    let processed: ProcessedFiles = results.into_iter().collect();
    let invalid = processed
        .values()
        .filter(|r| r.as_ref().map_or(true, |s| !s.valid_syntax()))
        .count();
    debug!(
        "[PROJECT] processed {} files, {} failed or invalid",
        processed.len(),
        invalid
    );
    processed
}

/// Collect and process every `.rill` file under `dir`.
pub fn process_directory(
    dir: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<ProcessedFiles, SourceError> {
    let paths = collect_file_paths(dir)?;
    Ok(process_files(&paths, options))
}
