//! Text Normalization
//!
//! Canonicalizes scripted and recognized text into one comparable form.
//! The same pipeline runs over chunk content offline and live ASR output
//! online; any asymmetry between the two silently degrades match quality,
//! so there is exactly one entry point.

use unicode_normalization::UnicodeNormalization;

const UNDER_TWENTY: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Normalize text into the canonical comparable form.
///
/// Pipeline, in order: Unicode NFC, lowercase, emoji strip, smart-quote
/// folding, digit runs expanded to English words, punctuation removal
/// (apostrophe survives), whitespace collapse, trim.
///
/// Pure and deterministic; empty output is valid for garbage input.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let lowered = composed.to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if is_emoji(ch) {
            continue;
        }
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' | '\u{201C}' | '\u{201D}'
            | '\u{201E}' | '\u{2033}' => cleaned.push('\''),
            _ => cleaned.push(ch),
        }
    }

    let expanded = expand_digit_runs(&cleaned);

    let mut words = String::with_capacity(expanded.len());
    for ch in expanded.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            words.push(ch);
        } else {
            // Punctuation becomes a word boundary, not a deletion
            words.push(' ');
        }
    }

    words.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pictographic / emoji code-point ranges stripped before matching
fn is_emoji(ch: char) -> bool {
    matches!(ch as u32,
        0x1F000..=0x1F02F  // mahjong / domino tiles
        | 0x1F300..=0x1F5FF // misc symbols and pictographs
        | 0x1F600..=0x1F64F // emoticons
        | 0x1F680..=0x1F6FF // transport
        | 0x1F900..=0x1F9FF // supplemental symbols
        | 0x1FA00..=0x1FAFF // extended-a
        | 0x1F1E6..=0x1F1FF // regional indicators
        | 0x2600..=0x26FF   // misc symbols
        | 0x2700..=0x27BF   // dingbats
        | 0xFE0E..=0xFE0F   // variation selectors
        | 0x200D            // zero-width joiner
    )
}

/// Replace every maximal run of ASCII digits with its English word expansion,
/// so scripted numerals match spoken number-words.
fn expand_digit_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            run.push(ch);
        } else {
            if !run.is_empty() {
                push_number_words(&mut out, &run);
                run.clear();
            }
            out.push(ch);
        }
    }
    if !run.is_empty() {
        push_number_words(&mut out, &run);
    }

    out
}

fn push_number_words(out: &mut String, digits: &str) {
    let words = match digits.parse::<u64>() {
        Ok(n) => number_to_words(n),
        // Run too long for u64: spell digit by digit
        Err(_) => digits
            .chars()
            .filter_map(|d| d.to_digit(10))
            .map(|d| UNDER_TWENTY[d as usize])
            .collect::<Vec<_>>()
            .join(" "),
    };
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
    out.push_str(&words);
    out.push(' ');
}

/// English words for a number, space separated (no hyphens, so the
/// expansion survives a second normalization pass unchanged).
fn number_to_words(n: u64) -> String {
    if n < 20 {
        return UNDER_TWENTY[n as usize].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as usize);
        rest /= 1000;
    }

    let mut parts = Vec::new();
    for (scale_idx, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        parts.push(triplet_to_words(group));
        if scale_idx > 0 {
            parts.push(SCALES[scale_idx].to_string());
        }
    }

    parts.join(" ")
}

fn triplet_to_words(n: usize) -> String {
    debug_assert!(n < 1000);
    let mut parts = Vec::new();

    let hundreds = n / 100;
    let rem = n % 100;

    if hundreds > 0 {
        parts.push(UNDER_TWENTY[hundreds].to_string());
        parts.push("hundred".to_string());
    }
    if rem >= 20 {
        parts.push(TENS[rem / 10].to_string());
        if rem % 10 > 0 {
            parts.push(UNDER_TWENTY[rem % 10].to_string());
        }
    } else if rem > 0 {
        parts.push(UNDER_TWENTY[rem].to_string());
    }

    parts.join(" ")
}
