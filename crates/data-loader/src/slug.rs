//! Identifier derivation from movie names.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turn a movie name into its identifier
///
/// Accents are stripped (NFD decomposition without combining marks), the
/// text is lowercased and trimmed, and every run of non-word characters
/// becomes a single `-`.
///
/// Example: "Amélie (Le Fabuleux Destin)" -> "amelie-le-fabuleux-destin-"
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut slug = String::with_capacity(folded.len());
    let mut in_separator = false;
    for c in folded.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }
    slug
}
