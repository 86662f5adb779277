//! Input validation for product descriptions.

use crate::error::AppError;

/// Minimum accepted description length, in characters, after trimming
pub const MIN_DESCRIPTION_CHARS: usize = 10;
/// Maximum accepted description length, in characters, after trimming
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Clean a raw description and check its length bounds.
///
/// Literal `\n` sequences become real newlines and `<`/`>` characters are
/// stripped before the length check. Returns the trimmed, sanitized string,
/// or a [`AppError::Validation`] when the result falls outside
/// [`MIN_DESCRIPTION_CHARS`]..=[`MAX_DESCRIPTION_CHARS`]. No side effects.
pub fn validate_description(raw: &str) -> Result<String, AppError> {
    let cleaned = sanitize(raw);
    let trimmed = cleaned.trim();
    let length = trimmed.chars().count();

    if length < MIN_DESCRIPTION_CHARS {
        return Err(AppError::validation(format!(
            "description is too short: {length} characters after cleanup (minimum {MIN_DESCRIPTION_CHARS})"
        )));
    }
    if length > MAX_DESCRIPTION_CHARS {
        return Err(AppError::validation(format!(
            "description is too long: {length} characters after cleanup (maximum {MAX_DESCRIPTION_CHARS})"
        )));
    }

    Ok(trimmed.to_string())
}

/// Un-escape literal backslash-n sequences and strip angle brackets
fn sanitize(raw: &str) -> String {
    raw.replace("\\n", "\n").replace(['<', '>'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(sanitize("a <b> c"), "a b c");
    }

    #[test]
    fn test_sanitize_unescapes_newlines() {
        assert_eq!(sanitize("line one\\nline two"), "line one\nline two");
    }
}
