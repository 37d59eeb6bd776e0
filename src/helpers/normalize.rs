//! Slug normalization for category and tag names

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks left behind by NFD on accented Latin letters
const DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Map a display name to a URL-safe identifier
///
/// Lowercases, decomposes (NFD) and drops combining diacritics, so accented
/// letters keep their base letter. Every remaining run of characters outside
/// `[a-z0-9]` becomes a single `-`, and hyphens are trimmed at both ends.
/// Characters without an ASCII base (`œ`, `ß`, emoji, CJK) are separators,
/// not transliterated. Idempotent.
///
/// # Examples
/// ```ignore
/// normalize_slug("Sécurité")  // -> "securite"
/// normalize_slug("UX / UI")   // -> "ux-ui"
/// ```
pub fn normalize_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().nfd().filter(|c| !DIACRITICS.contains(c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
