use std::env;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Why a working-directory change failed.
#[derive(Debug, Error)]
pub enum ChdirError {
    #[error("No such file or directory")]
    NotFound,

    #[error("Not a directory")]
    NotADirectory,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Other(io::Error),
}

impl From<io::Error> for ChdirError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ChdirError::NotFound,
            io::ErrorKind::PermissionDenied => ChdirError::PermissionDenied,
            _ if err.raw_os_error() == Some(libc::ENOTDIR) => ChdirError::NotADirectory,
            _ => ChdirError::Other(err),
        }
    }
}

pub fn change_dir(target: &Path) -> Result<(), ChdirError> {
    env::set_current_dir(target).map_err(ChdirError::from)
}
