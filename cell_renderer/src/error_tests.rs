//! Unit tests for error.rs
//!
//! Tests all Error variants, their trait implementations and the
//! engine_err!/engine_bail! helpers.

use crate::error::{Error, Result};
use serial_test::serial;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("device lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("device lost"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("G-buffer has no depth attachment".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("no depth attachment"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("render size is zero".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("render size is zero"));
}

#[test]
fn test_invalid_operation_display() {
    let err = Error::InvalidOperation("capture target is not a cubemap".to_string());
    assert_eq!(format!("{}", err), "Invalid operation: capture target is not a cubemap");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::BackendError("a".into())).contains("BackendError"));
    assert!(format!("{:?}", Error::InvalidResource("a".into())).contains("InvalidResource"));
    assert!(format!("{:?}", Error::InitializationFailed("a".into())).contains("InitializationFailed"));
    assert!(format!("{:?}", Error::InvalidOperation("a".into())).contains("InvalidOperation"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::InvalidResource("texture".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT AND PROPAGATION
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::BackendError("submit failed".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}

#[test]
#[serial]
fn test_engine_err_builds_invalid_operation() {
    let err = crate::engine_err!("cell::test", "target {} missing", "gbuffer");
    match err {
        Error::InvalidOperation(msg) => assert_eq!(msg, "target gbuffer missing"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    fn check(width: u32) -> Result<u32> {
        if width == 0 {
            crate::engine_bail!("cell::test", "width must be non-zero");
        }
        Ok(width)
    }

    assert!(check(0).is_err());
    assert_eq!(check(8).unwrap(), 8);
}
