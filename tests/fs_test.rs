//! ディレクトリ操作の結合テスト

use std::fs;

use rustykit::domain::entity::ScanOptions;
use rustykit::{remove_dir, scan_dir_for_files};
use tempfile::TempDir;

fn fixture(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in files {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    dir
}

fn dir_str(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_string()
}

#[test]
fn scans_default_image_extensions() {
    let dir = fixture(&["a.jpg", "b.txt", "c.PNG"]);
    let opts = ScanOptions::builder().names(true).sort(true).build();

    let files = scan_dir_for_files(&dir_str(&dir), &opts).unwrap();
    assert_eq!(files, Some(vec!["a.jpg".to_string(), "c.PNG".to_string()]));
}

#[test]
fn returns_full_paths_without_trailing_slash() {
    let dir = fixture(&["a.gif"]);
    let path = format!("{}/", dir_str(&dir));

    let files = scan_dir_for_files(&path, &ScanOptions::default()).unwrap().unwrap();
    assert_eq!(files, vec![format!("{}/a.gif", dir_str(&dir))]);
}

#[test]
fn explicit_extensions_and_substring_matches() {
    let dir = fixture(&["notes.txt", "photo.jpg.bak", "report.txt.old"]);
    let opts = ScanOptions::builder()
        .extensions(&["txt", "jpg"])
        .names(true)
        .sort(true)
        .build();

    let files = scan_dir_for_files(&dir_str(&dir), &opts).unwrap().unwrap();
    assert_eq!(files, vec!["notes.txt", "photo.jpg.bak", "report.txt.old"]);
}

#[test]
fn file_matching_two_extensions_is_listed_twice() {
    let dir = fixture(&["a.png.jpg"]);
    let opts = ScanOptions::builder().names(true).build();

    let files = scan_dir_for_files(&dir_str(&dir), &opts).unwrap().unwrap();
    assert_eq!(files, vec!["a.png.jpg", "a.png.jpg"]);
}

#[test]
fn subdirectories_are_skipped_and_empty_is_none() {
    let dir = fixture(&["readme.md"]);
    fs::create_dir(dir.path().join("nested.jpg")).unwrap();

    assert_eq!(
        scan_dir_for_files(&dir_str(&dir), &ScanOptions::default()).unwrap(),
        None
    );
    assert_eq!(
        scan_dir_for_files("/no/such/dir", &ScanOptions::default()).unwrap(),
        None
    );
}

#[test]
fn images_flag_off_without_extensions_lists_every_file() {
    let dir = fixture(&["b.txt", "a.jpg"]);
    fs::create_dir(dir.path().join("sub")).unwrap();
    let opts = ScanOptions::builder().images(false).names(true).sort(true).build();

    let files = scan_dir_for_files(&dir_str(&dir), &opts).unwrap();
    assert_eq!(files, Some(vec!["a.jpg".to_string(), "b.txt".to_string()]));
}

#[test]
fn listing_every_file_keeps_full_paths() {
    let dir = fixture(&["notes"]);
    let opts = ScanOptions::builder().images(false).build();

    let files = scan_dir_for_files(&dir_str(&dir), &opts).unwrap();
    assert_eq!(files, Some(vec![format!("{}/notes", dir_str(&dir))]));
}

#[test]
fn empty_directory_without_filter_is_none() {
    let dir = fixture(&[]);
    let opts = ScanOptions::builder().images(false).build();

    assert_eq!(scan_dir_for_files(&dir_str(&dir), &opts).unwrap(), None);
}

#[test]
fn remove_dir_deletes_nested_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::write(root.join("a/b/file.txt"), b"x").unwrap();
    fs::write(root.join("top.txt"), b"x").unwrap();

    assert!(remove_dir(&root).unwrap());
    assert!(!root.exists());
}

#[test]
fn remove_dir_on_file_returns_false() {
    let dir = fixture(&["plain.txt"]);
    let file = dir.path().join("plain.txt");

    assert!(!remove_dir(&file).unwrap());
    assert!(file.exists());
}

#[cfg(unix)]
#[test]
fn remove_dir_unlinks_symlinks_without_following() {
    let outside = fixture(&["keep.txt"]);
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    std::os::unix::fs::symlink(outside.path(), root.join("link")).unwrap();

    assert!(remove_dir(&root).unwrap());
    assert!(outside.path().join("keep.txt").exists());
}
