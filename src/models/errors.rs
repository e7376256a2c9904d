use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::task::JoinError;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Unsupported file [{}], expected a .csv file", path.display())]
    UnsupportedExtension {
        path: PathBuf
    },
    #[error("Could not read transactions from [{}]: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ParseError
    },
    #[error("Transaction loader stopped unexpectedly: {0}")]
    Loader(#[from] JoinError),
    #[error("Analysis of [{}] was cancelled before it completed", path.display())]
    Cancelled {
        path: PathBuf
    }
}

impl AnalyzerError {
    pub fn unsupported_extension(path: &Path) -> Self {
        Self::UnsupportedExtension { path: path.to_path_buf() }
    }

    pub fn load(path: &Path, source: ParseError) -> Self {
        Self::Load { path: path.to_path_buf(), source }
    }

    pub fn cancelled(path: &Path) -> Self {
        Self::Cancelled { path: path.to_path_buf() }
    }
}
