//! Prompt construction for the rewrite request.
//!
//! Pure functions; no I/O. The system prompt carries the fixed rewrite
//! instruction plus exactly one length clause, and the user prompt carries
//! the validated description verbatim behind a short label.

use crate::types::TargetLength;

const SYSTEM_INSTRUCTION: &str = "You are a product copywriter. Rewrite the product description \
supplied by the user in simple, clear language that any shopper can understand. Preserve the \
meaning and every factual claim of the source text. Do not introduce features, materials, or \
claims that are not present in the source text. Respond with the rewritten description only, \
without preamble or commentary.";

const CLAUSE_SHORTER: &str = "Make the rewrite noticeably shorter than the original.";
const CLAUSE_SAME_LENGTH: &str = "Keep the rewrite at roughly the same length as the original.";
const CLAUSE_LONGER: &str =
    "The rewrite may run longer than the original where extra words aid clarity.";

/// Build the fixed system prompt, with the length clause selected by the
/// optional hint. Absent a hint, same-length behavior applies.
pub fn create_system_prompt(target_length: Option<TargetLength>) -> String {
    let clause = match target_length.unwrap_or_default() {
        TargetLength::Short => CLAUSE_SHORTER,
        TargetLength::Medium => CLAUSE_SAME_LENGTH,
        TargetLength::Long => CLAUSE_LONGER,
    };
    format!("{SYSTEM_INSTRUCTION} {clause}")
}

/// Build the user prompt: the validated description behind an instruction label
pub fn create_user_prompt(description: &str) -> String {
    format!("Product description:\n{description}")
}
