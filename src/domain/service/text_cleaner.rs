use once_cell::sync::Lazy;
use regex::Regex;

// 2文字以上連続するASCII空白
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]{2,}").unwrap());

const TRIM_CHARS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// 前後と単語間の余分な空白を取り除く
///
/// 2文字以上続く空白だけを1つのスペースにまとめる。単独のタブや改行はそのまま残る。
pub fn trim_extra_space(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text, " ")
        .trim_matches(TRIM_CHARS.as_slice())
        .to_string()
}

/// HTMLと重複した空白・改行を取り除く
///
/// エンティティをデコードしてからタグを除去するので、`&lt;b&gt;` もタグとして消える。
/// 最後に `\r\n`, `\n` という2文字の並び（実際の改行ではない）と `+` をカンマに置き換える。
pub fn clean_text(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let stripped = strip_tags(&decoded);
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");

    collapsed
        .replace(r"\r\n", ",")
        .replace(r"\n", ",")
        .replace('+', ",")
}

/// タグを取り除く
///
/// 直後が空白の `<` は本文として残す。閉じられていないタグは末尾まで捨てる。
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if after.starts_with(|c: char| c.is_ascii_whitespace()) {
            out.push('<');
            rest = after;
            continue;
        }

        rest = match tag_end(after) {
            Some(end) => &after[end..],
            None => "",
        };
    }

    out.push_str(rest);
    out
}

// タグ本体の終わり ('>' の直後) のオフセット
fn tag_end(tag: &str) -> Option<usize> {
    if let Some(comment) = tag.strip_prefix("!--") {
        return comment.find("-->").map(|i| "!--".len() + i + "-->".len());
    }

    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }

    None
}
