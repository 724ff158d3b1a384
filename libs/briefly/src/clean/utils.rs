use std::sync::OnceLock;

use regex::Regex;

use crate::common::word_count;

/// Below this many words, multi-line OCR output is treated as bullet fragments.
const BULLET_WORD_LIMIT: usize = 80;

/// Literal fixes for common Tesseract misreads, applied in order.
const OCR_FIXES: &[(&str, &str)] = &[
    (" al ", " AI "),
    (" Al ", " AI "),
    (" are al", " are AI"),
    (" Self are", " Self aware"),
];

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9.,!?%()\-:; ]+").expect("static regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Normalizes OCR noise: newlines, stray symbols, spacing and a few known misreads.
pub fn smart_clean(text: &str) -> String {
    let text = text.replace('\n', " ");
    let text = disallowed_chars().replace_all(&text, " ");
    let mut text = whitespace_runs().replace_all(&text, " ").into_owned();

    for &(from, to) in OCR_FIXES {
        text = text.replace(from, to);
    }

    text.trim().to_string()
}

/// Joins short, line-broken OCR output (bullet lists) into a single paragraph.
pub fn structure_ocr_text(text: &str) -> String {
    if word_count(text) < BULLET_WORD_LIMIT && text.contains('\n') {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    text.to_string()
}

/// Cleaning applied by the front ends before handing text to the summarizer.
pub fn clean_text(text: &str) -> String {
    smart_clean(text)
}
