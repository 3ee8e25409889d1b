use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExisted,
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to create directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Makes sure `path` is a directory, creating it and any missing parents.
///
/// Safe to call repeatedly. Failures are logged as warnings before being
/// returned, so callers that choose to continue still leave a trace.
pub fn ensure(path: &Path) -> Result<Provisioned, ProvisionError> {
    let result = provision(path);
    match &result {
        Ok(Provisioned::Created) => log::debug!("Created directory {}", path.display()),
        Ok(Provisioned::AlreadyExisted) => {}
        Err(e) => log::warn!("{e}"),
    }
    result
}

fn provision(path: &Path) -> Result<Provisioned, ProvisionError> {
    if path.is_dir() {
        return Ok(Provisioned::AlreadyExisted);
    }
    if path.exists() {
        return Err(ProvisionError::NotADirectory(path.to_path_buf()));
    }
    std::fs::create_dir_all(path).map_err(|source| ProvisionError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Provisioned::Created)
}
