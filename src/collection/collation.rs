//! Locale-aware string ordering.
//!
//! A small collation in the spirit of the root Unicode collation: at the
//! primary level separators sort before digits, digits before letters, and
//! accented Latin letters weigh the same as their base letter. Ties at the
//! primary level fall back to the plain lowercased string so the order is
//! total.

use std::cmp::Ordering;
use unicode_segmentation::UnicodeSegmentation;

const CLASS_SEPARATOR: u8 = 0;
const CLASS_DIGIT: u8 = 1;
const CLASS_LETTER: u8 = 2;
const CLASS_OTHER: u8 = 3;

/// Compare two strings case-insensitively with locale-aware ordering.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    collation_key(&a)
        .cmp(&collation_key(&b))
        .then_with(|| a.cmp(&b))
}

/// Primary collation weights for an already lowercased string.
pub fn collation_key(lowercased: &str) -> Vec<(u8, char)> {
    let mut key = Vec::with_capacity(lowercased.len());
    // Combining marks stay in the same grapheme as their base letter, so only
    // the first scalar of each grapheme carries weight.
    for grapheme in lowercased.graphemes(true) {
        let Some(first) = grapheme.chars().next() else {
            continue;
        };
        match fold(first) {
            Some(base) => key.extend(base.chars().map(|c| (class_of(c), c))),
            None => key.push((class_of(first), first)),
        }
    }
    key
}

fn class_of(c: char) -> u8 {
    if c.is_whitespace() || c.is_ascii_punctuation() || is_general_punctuation(c) {
        CLASS_SEPARATOR
    } else if c.is_numeric() {
        CLASS_DIGIT
    } else if c.is_alphabetic() {
        CLASS_LETTER
    } else {
        CLASS_OTHER
    }
}

fn is_general_punctuation(c: char) -> bool {
    matches!(c, '\u{00a1}'..='\u{00bf}' | '\u{2000}'..='\u{206f}')
}

/// Map a lowercase Latin letter with diacritics (or a ligature) to its
/// primary-level base letters.
fn fold(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(base)
}
