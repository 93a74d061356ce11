use crate::error::{AssetKind, Error};
use crate::utils::Result;
use std::path::{Path, PathBuf};

/// Maps a logical asset name to a file: the name itself if it exists,
/// otherwise the same name inside `default_dir`.
#[derive(Debug, Clone)]
pub struct Resolver {
    kind: AssetKind,
    default_dir: PathBuf,
}

impl Resolver {
    pub fn new(kind: AssetKind, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            default_dir: default_dir.into(),
        }
    }

    /// For names supplied by the user: an existing path wins over the default dir.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let direct = Path::new(name);
        if !name.is_empty() && direct.exists() {
            return self.absolute(direct);
        }
        self.resolve_in_default_dir(name)
    }

    /// For computed names: only the default dir is searched, never the working directory.
    pub fn resolve_in_default_dir(&self, name: &str) -> Result<PathBuf> {
        let candidate = self.default_dir.join(name);
        if !name.is_empty() && candidate.exists() {
            return self.absolute(&candidate);
        }

        Err(Error::Resolution {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        let resolved = std::path::absolute(path)
            .map_err(|e| Error::io(format!("Resolving {} {}", self.kind, path.display()), e))?;
        log::debug!("Resolved {} {}", self.kind, resolved.display());
        Ok(resolved)
    }
}
