use drawkit_core::{EmptyResultError, Error, InvariantError, ModeError, TopologyError};
use uuid::Uuid;

#[test]
fn test_topology_errors_are_recoverable() {
    let err: Error = TopologyError::AxisNotConvertible.into();
    assert!(err.is_recoverable());
    assert!(!err.is_invariant_violation());
    assert_eq!(err.user_message(), "The symmetry axis cannot be converted");
}

#[test]
fn test_empty_result_message() {
    let err: Error = EmptyResultError::BreakSide { side: "second" }.into();
    assert!(err.is_recoverable());
    assert_eq!(
        err.to_string(),
        "Breaking here would leave the second part empty"
    );
}

#[test]
fn test_mode_error_message() {
    let err: Error = ModeError::InteractionActive {
        active: "distortion",
    }
    .into();
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), "Finish or abandon the current distortion first");
}

#[test]
fn test_invariant_errors_are_not_recoverable() {
    let err: Error = InvariantError::IdentityMismatch {
        expected: Uuid::nil(),
        found: None,
        index: 3,
    }
    .into();
    assert!(!err.is_recoverable());
    assert!(err.is_invariant_violation());
    assert!(err.to_string().starts_with("Internal error"));
    assert_eq!(
        err.user_message(),
        "The edit history is inconsistent and has been cleared"
    );
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_recoverable());
}
