// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
///
/// The run touches at most five files, so the surface is kept to what the
/// precondition check, the default lookups and the final write need.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        // Replace the file a symlink points at, not the link itself.
        let target = match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(_) => path.to_path_buf(),
        };
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

        // Write next to the target and rename, so a failed write never
        // leaves a truncated pipeline file behind.
        let tmp = target.with_extension("tmp-travis-to-heroku");
        fs::write(&tmp, contents).with_context(|| format!("writing file {:?}", tmp))?;
        if let Some(permissions) = permissions {
            fs::set_permissions(&tmp, permissions)
                .with_context(|| format!("copying permissions onto {:?}", tmp))?;
        }
        fs::rename(&tmp, &target).with_context(|| format!("replacing file {:?}", target))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
