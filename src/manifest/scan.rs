/// Directory scan shared by `generate` and the live API
///
/// The layout is `<root>/<tag>/<image>`: every immediate subdirectory of the
/// root is a tag, every image file directly inside it is a record.
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::data::ImageRecord;
use crate::error::{GalleryError, Result};

/// Supported image file extensions (matched case-insensitively)
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Check whether a file name looks like a gallery image
pub fn is_image_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Immediate children of `dir`, sorted by file name.
/// Links are listed, not followed. Any read failure aborts the whole listing.
fn children(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|source| GalleryError::Scan {
                path: dir.to_path_buf(),
                source,
            })
        })
        .collect()
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

/// A plain file, or a symlink that currently resolves to one
fn is_file_entry(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        return fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false);
    }
    entry.file_type().is_file()
}

/// List the tag names under `root` (one per subdirectory)
pub fn list_tags(root: &Path) -> Result<Vec<String>> {
    let tags = children(root)?
        .iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(entry_name)
        .collect();
    Ok(tags)
}

/// List every image record under `root`.
///
/// `src_base` is prepended to `<tag>/<file>` to build each record's `src`,
/// e.g. `"gallery"` for the manifest file or `"/gallery"` for the API.
pub fn list_records(root: &Path, src_base: &str) -> Result<Vec<ImageRecord>> {
    let mut records = Vec::new();

    for tag in list_tags(root)? {
        for entry in children(&root.join(&tag))? {
            let file = entry_name(&entry);
            if !is_image_file(&file) {
                continue;
            }

            // Only files directly inside the tag folder; dangling links are skipped
            if !is_file_entry(&entry) {
                tracing::debug!("Skipping {}", entry.path().display());
                continue;
            }

            records.push(ImageRecord::new(format!("{}/{}/{}", src_base, tag, file), tag.clone()));
        }
    }

    tracing::debug!("🔍 Scanned {}: {} images", root.display(), records.len());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    /// cats: 2 jpgs, dogs: 1 png + 1 txt, plus a stray file at the root
    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("cats")).unwrap();
        fs::create_dir(root.join("dogs")).unwrap();
        touch(&root.join("cats/one.jpg"));
        touch(&root.join("cats/two.JPG"));
        touch(&root.join("dogs/rex.png"));
        touch(&root.join("dogs/notes.txt"));
        touch(&root.join("stray.jpg"));
        dir
    }

    fn sorted(mut records: Vec<ImageRecord>) -> Vec<ImageRecord> {
        records.sort_by(|a, b| a.src.cmp(&b.src));
        records
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("a.jpg"));
        assert!(is_image_file("a.JPEG"));
        assert!(is_image_file("archive.tar.Png"));
        assert!(is_image_file("x.gif"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("jpg"));
        assert!(!is_image_file("a.jpg.bak"));
    }

    #[test]
    fn test_records_for_cats_and_dogs() {
        let dir = fixture();
        let records = sorted(list_records(dir.path(), "gallery").unwrap());

        assert_eq!(
            records,
            vec![
                ImageRecord::new("gallery/cats/one.jpg", "cats"),
                ImageRecord::new("gallery/cats/two.JPG", "cats"),
                ImageRecord::new("gallery/dogs/rex.png", "dogs"),
            ]
        );
        assert!(records.iter().all(|r| r.description.is_empty()));
    }

    #[test]
    fn test_src_base_is_prepended() {
        let dir = fixture();
        let records = list_records(dir.path(), "/gallery").unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.src.starts_with("/gallery/")));
    }

    #[test]
    fn test_nested_folders_inside_a_tag_are_ignored() {
        let dir = fixture();
        fs::create_dir(dir.path().join("cats/kittens.jpg")).unwrap();
        touch(&dir.path().join("cats/kittens.jpg/deep.jpg"));

        let records = list_records(dir.path(), "gallery").unwrap();
        assert_eq!(records.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_links_do_not_break_the_scan() {
        use std::os::unix::fs::symlink;

        let dir = fixture();
        let root = dir.path();
        symlink(root.join("nowhere.jpg"), root.join("cats/old.jpg")).unwrap();
        symlink(root.join("gone"), root.join("ghosts")).unwrap();

        let records = sorted(list_records(root, "gallery").unwrap());
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.src.ends_with("old.jpg")));

        let mut tags = list_tags(root).unwrap();
        tags.sort();
        assert_eq!(tags, vec!["cats", "dogs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_linked_images_are_listed() {
        use std::os::unix::fs::symlink;

        let dir = fixture();
        let root = dir.path();
        symlink(root.join("stray.jpg"), root.join("dogs/linked.jpg")).unwrap();

        let records = sorted(list_records(root, "gallery").unwrap());
        assert_eq!(records.len(), 4);
        assert_eq!(records[2], ImageRecord::new("gallery/dogs/linked.jpg", "dogs"));
    }

    #[test]
    fn test_tags_are_subdirectories_only() {
        let dir = fixture();
        let mut tags = list_tags(dir.path()).unwrap();
        tags.sort();

        assert_eq!(tags, vec!["cats", "dogs"]);
    }

    #[test]
    fn test_empty_root() {
        let dir = tempdir().unwrap();

        assert!(list_records(dir.path(), "gallery").unwrap().is_empty());
        assert!(list_tags(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gallery");

        assert!(matches!(
            list_records(&missing, "gallery"),
            Err(GalleryError::Scan { .. })
        ));
        assert!(list_tags(&missing).is_err());
    }
}
