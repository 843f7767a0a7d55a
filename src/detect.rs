use whatlang::Lang;

use crate::models::Language;

/// Classify free text as Urdu or English.
///
/// Total over all inputs: Urdu is returned only when the statistical detector
/// identifies the text as Urdu; everything else, including empty or
/// too-short-to-classify input, falls back to English. Detection failure is
/// deliberately absorbed here so the rest of the pipeline never has to handle
/// it.
pub fn detect_language(text: &str) -> Language {
    match whatlang::detect_lang(text) {
        Some(Lang::Urd) => Language::Urdu,
        _ => Language::English,
    }
}
