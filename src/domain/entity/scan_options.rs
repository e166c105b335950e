use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// 画像とみなす既定の拡張子
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "gif"];

/// `scan_dir_for_files` のオプション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct ScanOptions {
    /// 拡張子の指定がないとき画像 (jpg, png, gif) を探す
    #[builder(default = true)]
    pub images: bool,

    /// 対象の拡張子 (ドットなし)
    #[builder(default, setter(transform = |exts: &[&str]| exts.iter().map(|e| e.to_string()).collect()))]
    pub extensions: Vec<String>,

    /// フルパスではなくファイル名だけを返す
    #[builder(default)]
    pub names: bool,

    /// 辞書順に並べ替える
    #[builder(default)]
    pub sort: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScanOptions {
    /// 実際に照合する拡張子 (空ならすべてのファイルが対象)
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.images && self.extensions.is_empty() {
            DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions.clone()
        }
    }
}
