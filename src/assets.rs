//! Copy referenced assets into the output directory under their new names.
use crate::names::NameMapping;
use crate::staging;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("image {} doesn't exist", .path.display())]
    Missing { path: PathBuf },
}

/// One asset written to the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct CopiedAsset {
    pub from: PathBuf,
    pub to: PathBuf,
    pub bytes: u64,
}

/// Resolves asset file names inside one directory.
#[derive(Debug, Clone)]
pub struct AssetDir<'a> {
    root: &'a Path,
    extension: &'a str,
}

impl<'a> AssetDir<'a> {
    pub fn new(root: &'a Path, extension: &'a str) -> Self {
        Self { root, extension }
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{}", self.extension))
    }
}

/// Copy every mapped asset in mapping order. Stops at the first missing
/// source; assets copied before it stay in place.
pub fn copy_assets(
    mapping: &NameMapping,
    from: &AssetDir<'_>,
    to: &AssetDir<'_>,
) -> Result<Vec<CopiedAsset>> {
    let mut copied = Vec::with_capacity(mapping.len());
    for (old_name, new_name) in mapping.iter() {
        let from_path = from.asset_path(old_name);
        if !from_path.is_file() {
            return Err(AssetError::Missing { path: from_path }.into());
        }
        let to_path = to.asset_path(new_name);
        let bytes = staging::copy_file(&from_path, &to_path)?;
        tracing::debug!(from = %from_path.display(), to = %to_path.display(), bytes, "copied asset");
        copied.push(CopiedAsset {
            from: from_path,
            to: to_path,
            bytes,
        });
    }
    Ok(copied)
}
