//! Built-in agent instructions.
//!
//! Preambles are embedded via `include_str!` so they ship with the binary.

const REVIEWER_MD: &str = include_str!("reviewer.md");
const TRANSLATOR_MD: &str = include_str!("translator.md");

/// System preamble of the merge request reviewer.
pub fn reviewer_preamble() -> &'static str {
    REVIEWER_MD
}

/// System preamble of the translator, rendered for `target_language`.
pub fn translator_preamble(target_language: &str) -> String {
    TRANSLATOR_MD.replace("{target_language}", target_language)
}
