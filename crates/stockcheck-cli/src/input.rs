//! Reading the list of product URLs for a batch run.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("input file {} not found", path.display())]
    Missing { path: PathBuf },

    #[error("input file {} contains no URLs", path.display())]
    Empty { path: PathBuf },

    #[error("failed to read input file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads one URL per line, trimming whitespace and skipping blank lines.
///
/// Order is preserved and duplicates are kept.
pub(crate) fn read_urls(path: &Path) -> Result<Vec<String>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let urls = parse_urls(&content);
    if urls.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(urls)
}

fn parse_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
