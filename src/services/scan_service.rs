use std::path::Path;

use walkdir::WalkDir;

use crate::error::AppError;
use crate::services::file_service::QUARANTINE_DIRNAME;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

fn should_skip(entry: &walkdir::DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') {
        return true;
    }

    // Never descend into the quarantine; everything in it is already culled.
    entry.file_type().is_dir() && name == QUARANTINE_DIRNAME
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Lists the images under `root` as sorted root-relative identities,
/// excluding hidden entries and the quarantine directory.
pub fn list_items(root: &Path) -> Result<Vec<String>, AppError> {
    if !root.is_dir() {
        return Err(AppError::General(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !should_skip(e))
    {
        let entry = entry.map_err(|e| AppError::General(e.to_string()))?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| AppError::General(e.to_string()))?;
        items.push(rel.to_string_lossy().replace('\\', "/"));
    }

    items.sort();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_lists_images_sorted_and_relative() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.jpg")).unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("c.webp")).unwrap();

        let items = list_items(dir.path()).unwrap();

        assert_eq!(items, ["a.png", "b.jpg", "sub/c.webp"]);
    }

    #[test]
    fn test_skips_non_images_and_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join(".hidden.jpg")).unwrap();
        File::create(dir.path().join("photo.JPG")).unwrap();

        let items = list_items(dir.path()).unwrap();

        assert_eq!(items, ["photo.JPG"]);
    }

    #[test]
    fn test_skips_quarantine_directory() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("keep.jpg")).unwrap();
        let quarantine = dir.path().join(QUARANTINE_DIRNAME);
        fs::create_dir_all(&quarantine).unwrap();
        File::create(quarantine.join("gone.jpg")).unwrap();

        let items = list_items(dir.path()).unwrap();

        assert_eq!(items, ["keep.jpg"]);
    }

    #[test]
    fn test_missing_root_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = list_items(&dir.path().join("nope"));
        assert!(result.is_err());
    }
}
