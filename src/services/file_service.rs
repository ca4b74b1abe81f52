use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const QUARANTINE_DIRNAME: &str = "_culled";

/// Filesystem capabilities the engine needs from its host: an atomic move
/// and an existence check.
pub trait FileOps {
    fn move_item(&self, source: &Path, destination: &Path) -> Result<(), AppError>;
    fn exists(&self, path: &Path) -> bool;
}

pub struct StdFileOps;

impl FileOps for StdFileOps {
    fn move_item(&self, source: &Path, destination: &Path) -> Result<(), AppError> {
        if !source.exists() {
            return Err(AppError::General(format!(
                "source does not exist: {}",
                source.display()
            )));
        }
        if destination.exists() {
            return Err(AppError::General(format!(
                "destination already exists: {}",
                destination.display()
            )));
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(source, destination)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub fn quarantine_dir(root: &Path) -> PathBuf {
    root.join(QUARANTINE_DIRNAME)
}

/// Picks a free name for `file_name` inside `dir`, suffixing " (n)" before
/// the extension until nothing is in the way.
pub fn unique_destination(ops: &dyn FileOps, dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !ops.exists(&candidate) {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let ext = name.extension().map(|e| e.to_string_lossy().to_string());

    let mut i = 1;
    loop {
        let numbered = match &ext {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };
        let candidate = dir.join(numbered);
        if !ops.exists(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_move_item() {
        let base = tempfile::tempdir().unwrap();
        let src = base.path().join("file.jpg");
        let dest = base.path().join("target").join("file.jpg");
        File::create(&src).unwrap().write_all(b"data").unwrap();

        StdFileOps.move_item(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "data");
    }

    #[test]
    fn test_move_missing_source_rejected() {
        let base = tempfile::tempdir().unwrap();
        let result = StdFileOps.move_item(
            &base.path().join("ghost.jpg"),
            &base.path().join("out.jpg"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_move_never_overwrites() {
        let base = tempfile::tempdir().unwrap();
        let src = base.path().join("a.jpg");
        let dest = base.path().join("b.jpg");
        File::create(&src).unwrap().write_all(b"new").unwrap();
        File::create(&dest).unwrap().write_all(b"old").unwrap();

        assert!(StdFileOps.move_item(&src, &dest).is_err());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn test_unique_destination_prefers_plain_name() {
        let base = tempfile::tempdir().unwrap();
        let dest = unique_destination(&StdFileOps, base.path(), "photo.jpg");
        assert_eq!(dest, base.path().join("photo.jpg"));
    }

    #[test]
    fn test_unique_destination_numbers_collisions() {
        let base = tempfile::tempdir().unwrap();
        File::create(base.path().join("photo.jpg")).unwrap();

        let dest = unique_destination(&StdFileOps, base.path(), "photo.jpg");
        assert_eq!(dest, base.path().join("photo (1).jpg"));

        File::create(&dest).unwrap();
        let next = unique_destination(&StdFileOps, base.path(), "photo.jpg");
        assert_eq!(next, base.path().join("photo (2).jpg"));
    }

    #[test]
    fn test_unique_destination_without_extension() {
        let base = tempfile::tempdir().unwrap();
        File::create(base.path().join("README")).unwrap();

        let dest = unique_destination(&StdFileOps, base.path(), "README");
        assert_eq!(dest, base.path().join("README (1)"));
    }
}
