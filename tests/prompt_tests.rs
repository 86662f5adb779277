use resay::prompt::{create_system_prompt, create_user_prompt};
use resay::types::TargetLength;
use std::collections::HashSet;

#[test]
fn test_system_prompt_is_deterministic() {
    assert_eq!(
        create_system_prompt(Some(TargetLength::Short)),
        create_system_prompt(Some(TargetLength::Short))
    );
}

#[test]
fn test_default_matches_same_length_behavior() {
    assert_eq!(
        create_system_prompt(None),
        create_system_prompt(Some(TargetLength::Medium))
    );
}

#[test]
fn test_three_distinct_length_variants() {
    let variants: HashSet<String> = TargetLength::ALL
        .iter()
        .map(|length| create_system_prompt(Some(*length)))
        .collect();
    assert_eq!(variants.len(), 3);
}

#[test]
fn test_system_prompt_core_instruction() {
    let prompt = create_system_prompt(None);
    assert!(prompt.contains("simple, clear language"));
    assert!(prompt.contains("not present in the source text"));
}

#[test]
fn test_user_prompt_contains_description_verbatim() {
    let description = "This premium leather wallet features multiple card slots.";
    let prompt = create_user_prompt(description);
    assert!(prompt.contains(description));
}

#[test]
fn test_user_prompt_is_pure() {
    let description = "A warm winter jacket with a detachable hood.";
    assert_eq!(create_user_prompt(description), create_user_prompt(description));
}
