//! 英数字のランダム文字列
//!
//! 暗号論的に安全な乱数ではない。セッショントークンやパスワードリセット用には使わないこと。

use rand::Rng;

/// 既定の長さ
pub const DEFAULT_LENGTH: usize = 16;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `[0-9a-zA-Z]` から重複ありで一様に選んだ `length` 文字の文字列
pub fn random_string(length: usize) -> String {
    random_string_with(&mut rand::thread_rng(), length)
}

/// 乱数生成器を指定して生成する
pub fn random_string_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
