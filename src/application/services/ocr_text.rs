use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SPLIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Clean up vision-OCR output before it joins the acquired text: NFKC folds
/// the ligatures models copy out of print, words hyphenated across line
/// breaks are rejoined, and whitespace runs collapse while paragraph breaks
/// survive.
pub fn normalize_ocr_text(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    let rejoined = SPLIT_WORD.replace_all(&folded, "$head$tail");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in rejoined.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(collapsed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs.join("\n\n")
}
