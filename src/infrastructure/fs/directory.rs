use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::entity::ScanOptions;

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T, FileSystemError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, FileSystemError> {
        self.map_err(|source| FileSystemError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// ディレクトリを中身ごと削除する
///
/// ディレクトリでなければ `Ok(false)`。シンボリックリンクは辿らずにリンク自体を消す。
pub fn remove_dir(path: impl AsRef<Path>) -> Result<bool, FileSystemError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(false);
    }

    remove_tree(path)?;
    debug!(path = %path.display(), "ディレクトリを削除しました");
    Ok(true)
}

fn remove_tree(dir: &Path) -> Result<(), FileSystemError> {
    for entry in fs::read_dir(dir).at(dir)? {
        let entry = entry.at(dir)?;
        let path = entry.path();

        if entry.file_type().at(&path)?.is_dir() {
            remove_tree(&path)?;
        } else {
            fs::remove_file(&path).at(&path)?;
        }
    }

    fs::remove_dir(dir).at(dir)
}

/// ディレクトリ直下のファイルを拡張子で探す
///
/// 拡張子は末尾ではなく部分一致で照合するので `a.jpg.bak` も `jpg` に一致する。
/// 複数の拡張子に一致したファイルはその数だけ返る。画像を探さず拡張子の指定もなければ
/// ディレクトリ以外のすべてを返す。何もなければ `Ok(None)`。
pub fn scan_dir_for_files(
    dir: &str,
    options: &ScanOptions,
) -> Result<Option<Vec<String>>, FileSystemError> {
    let normalized = dir.replace('\\', "/");
    let dir = normalized.trim_end_matches('/');
    let dir_path = Path::new(dir);

    if !dir_path.is_dir() {
        debug!(dir, "ディレクトリではありません");
        return Ok(None);
    }

    let extensions = options.effective_extensions();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir_path).at(dir_path)? {
        let entry = entry.at(dir_path)?;
        if entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let listed = if options.names {
            name.clone()
        } else {
            format!("{}/{}", dir, name)
        };

        // 拡張子の指定がなければすべてのファイル
        if extensions.is_empty() {
            files.push(listed);
            continue;
        }

        for ext in extensions.iter().filter(|ext| matches_extension(&name, ext)) {
            debug!(file = %name, ext = %ext, "一致しました");
            files.push(listed.clone());
        }
    }

    if files.is_empty() {
        return Ok(None);
    }
    if options.sort {
        files.sort();
    }
    Ok(Some(files))
}

// `.EXT` か `.ext` が先頭以外のどこかに現れるか
fn matches_extension(name: &str, ext: &str) -> bool {
    let found_after_start = |needle: String| name.find(&needle).map_or(false, |pos| pos > 0);
    found_after_start(format!(".{}", ext.to_uppercase()))
        || found_after_start(format!(".{}", ext.to_lowercase()))
}

/// 実行中のOSがWindowsか
pub fn is_windows() -> bool {
    cfg!(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a.jpg", "jpg", true ; "lower case suffix")]
    #[test_case("a.JPG", "jpg", true ; "upper case suffix")]
    #[test_case("a.Jpg", "jpg", false ; "mixed case is not matched")]
    #[test_case(".jpg", "jpg", false ; "dot at position zero")]
    #[test_case("a.jpg.bak", "jpg", true ; "substring match")]
    #[test_case("a.png", "jpg", false ; "different extension")]
    fn extension_matching(name: &str, ext: &str, expected: bool) {
        assert_eq!(matches_extension(name, ext), expected);
    }

    #[test]
    fn missing_directory_is_not_removed() {
        assert!(!remove_dir("/definitely/not/here").unwrap());
    }

    #[test]
    fn windows_flag_matches_target() {
        assert_eq!(is_windows(), cfg!(target_os = "windows"));
    }
}
