use resay::error::AppError;
use resay::validator::{MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS, validate_description};

#[test]
fn test_accepts_description_within_bounds() {
    let input = "This premium leather wallet features multiple card slots.";
    let cleaned = validate_description(input).expect("in-bounds description should validate");
    assert_eq!(cleaned, input);
}

#[test]
fn test_trims_surrounding_whitespace() {
    let cleaned = validate_description("   A soft cotton shirt for men.  \n")
        .expect("description should validate");
    assert_eq!(cleaned, "A soft cotton shirt for men.");
}

#[test]
fn test_strips_angle_brackets() {
    let cleaned = validate_description("Soft cotton <tee> shirt for men")
        .expect("description should validate");
    assert_eq!(cleaned, "Soft cotton tee shirt for men");
}

#[test]
fn test_unescapes_literal_newlines() {
    let cleaned = validate_description("Warm winter jacket.\\nWind and water resistant.")
        .expect("description should validate");
    assert_eq!(cleaned, "Warm winter jacket.\nWind and water resistant.");
}

#[test]
fn test_rejects_too_short() {
    let err = validate_description("tiny").expect_err("short description should fail");
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn test_rejects_whitespace_only() {
    let err = validate_description("      \n\t  ").expect_err("blank description should fail");
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn test_rejects_too_long() {
    let input = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
    let err = validate_description(&input).expect_err("oversized description should fail");
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn test_boundary_lengths_accepted() {
    let min = "a".repeat(MIN_DESCRIPTION_CHARS);
    assert!(validate_description(&min).is_ok());

    let max = "a".repeat(MAX_DESCRIPTION_CHARS);
    assert!(validate_description(&max).is_ok());
}

#[test]
fn test_length_is_checked_after_sanitization() {
    // 14 raw characters, but only 8 remain once the brackets are stripped
    let err = validate_description("<<<<<abcdefgh>").expect_err("sanitized length is under the minimum");
    assert!(matches!(err, AppError::Validation { .. }));
}
