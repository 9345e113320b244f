// error.rs - Error types for regmatch.
//
// Invariant violations inside the view layer trap with the Display text of
// one of these variants; the `try_*` twins hand the same value back instead.

use std::fmt;

use crate::regview::ViewKind;

/// Error type for view operations and match bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// An operation was invoked on a view-kind combination with no defined semantics.
    UnsupportedPairing {
        op: &'static str,
        receiver: ViewKind,
        argument: ViewKind,
    },
    /// An operation read a null (unset) view.
    NullView { op: &'static str },
    /// A unit-local index or range reached past the end of a view.
    IndexOutOfRange { index: usize, length: usize },
    /// A capture was recorded for a group the pattern does not have.
    UnknownGroup { group: usize, group_count: usize },
    /// The fail counter passed the configured retry limit; the call was abandoned.
    RetryLimitInMatchOver { limit: u64, failures: u64 },
    /// The checkpoint stack grew past the configured depth.
    MatchStackLimitOver { limit: usize },
    /// An attempt reported terminal failure with checkpoints still pending.
    UnbalancedCheckpoints { depth: usize },
    /// Error raised by the external executor.
    Interpreter(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::UnsupportedPairing {
                op,
                receiver,
                argument,
            } => write!(f, "{} is not supported for {} with {}", op, receiver, argument),
            MatchError::NullView { op } => write!(f, "{} on a null view", op),
            MatchError::IndexOutOfRange { index, length } => {
                write!(f, "index {} out of range for view of length {}", index, length)
            }
            MatchError::UnknownGroup { group, group_count } => {
                write!(f, "capture group {} out of range (pattern has {})", group, group_count)
            }
            MatchError::RetryLimitInMatchOver { limit, failures } => {
                write!(f, "retry-limit-in-match over ({} failures, limit {})", failures, limit)
            }
            MatchError::MatchStackLimitOver { limit } => {
                write!(f, "match-stack limit over (limit {})", limit)
            }
            MatchError::UnbalancedCheckpoints { depth } => {
                write!(f, "attempt failed with {} pending checkpoints", depth)
            }
            MatchError::Interpreter(message) => write!(f, "interpreter error: {}", message),
        }
    }
}

impl std::error::Error for MatchError {}

impl MatchError {
    /// True for the two limit variants, which a caller may treat as
    /// "abandoned" rather than as a defect.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            MatchError::RetryLimitInMatchOver { .. } | MatchError::MatchStackLimitOver { .. }
        )
    }
}

/// Panic with the error's message. Used by the trapping view operations.
#[cold]
#[track_caller]
pub(crate) fn trap(err: MatchError) -> ! {
    panic!("{}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_pairing_message() {
        let err = MatchError::UnsupportedPairing {
            op: "starts_with",
            receiver: ViewKind::Utf32,
            argument: ViewKind::Bytes,
        };
        assert_eq!(
            err.to_string(),
            "starts_with is not supported for Utf32View with ByteView"
        );
        assert!(!err.is_limit());
    }

    #[test]
    fn limit_variants() {
        let err = MatchError::RetryLimitInMatchOver {
            limit: 10,
            failures: 11,
        };
        assert!(err.is_limit());
        assert!(err.to_string().contains("retry-limit-in-match over"));
        assert!(MatchError::MatchStackLimitOver { limit: 4 }.is_limit());
    }

    #[test]
    fn display_impl() {
        let err = MatchError::IndexOutOfRange {
            index: 5,
            length: 3,
        };
        assert_eq!(format!("{}", err), "index 5 out of range for view of length 3");
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(MatchError::NullView { op: "at" });
        assert_eq!(err.to_string(), "at on a null view");
    }

    #[test]
    #[should_panic(expected = "lines on a null view")]
    fn trap_panics_with_message() {
        trap(MatchError::NullView { op: "lines" });
    }
}
