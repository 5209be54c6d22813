//! Schema discovery and parsing.

use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use webext_typegen::input::{self, ParseError};
use webext_typegen::ir::Namespace;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Collect and parse every `.json` document below the given directories.
///
/// Documents sort by file name before path, so fragments of one API land
/// next to each other no matter which directory supplied them, and the
/// whole load order is reproducible.
pub fn load_directories(dirs: &[PathBuf]) -> Result<Vec<Vec<Namespace>>, LoadError> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for dir in dirs {
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|source| LoadError::Walk {
                path: dir.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                files.push((name, path));
            }
        }
    }
    files.sort();

    let mut fragments = Vec::with_capacity(files.len());
    for (_, path) in files {
        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed = input::parse_fragment(&text).map_err(|source| LoadError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), namespaces = parsed.len(), "schema loaded");
        fragments.push(parsed);
    }
    Ok(fragments)
}
