use filestamp::validator::{MAX_NAME_LEN, RESERVED_NAMES};
use filestamp::{FileStampError, validate_name};

fn message(name: &str) -> String {
    validate_name(name)
        .error_message
        .unwrap_or_else(|| panic!("{name:?} should be rejected"))
}

#[test]
fn first_failing_rule_wins() {
    // Too long and containing a reserved character: length is checked first.
    let long_and_bad = format!("{}|", "a".repeat(MAX_NAME_LEN));
    assert!(message(&long_and_bad).contains("too long"));

    // Reserved character and device name: the character is reported.
    assert_eq!(message("CON:"), "invalid character ':' in name");
}

#[test]
fn boundary_length_is_accepted() {
    assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).valid);
    assert!(!validate_name(&"x".repeat(MAX_NAME_LEN + 1)).valid);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert!(validate_name("  holiday photos  ").valid);
    assert_eq!(message("   "), "name must not be empty");
}

#[test]
fn every_reserved_device_name_is_rejected() {
    for name in RESERVED_NAMES {
        assert!(message(name).contains("reserved"), "{name}");
        assert!(message(&name.to_lowercase()).contains("reserved"), "{name}");
        assert!(message(&format!("{name}.txt")).contains("reserved"), "{name}");
    }
}

#[test]
fn control_nul_is_reported_escaped() {
    assert_eq!(message("a\0b"), "invalid character '\\0' in name");
}

#[test]
fn valid_result_has_no_message() {
    let r = validate_name("final");
    assert!(r.valid);
    assert!(r.error_message.is_none());
    assert!(r.into_result().is_ok());
}

#[test]
fn invalid_result_converts_to_validation_error() {
    let err = validate_name("..").into_result().unwrap_err();
    assert!(matches!(err, FileStampError::Validation(ref m) if m == "name must not be '..'"));
    assert_eq!(err.kind(), "validation");
}
