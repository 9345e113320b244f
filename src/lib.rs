//! # regmatch
//!
//! Subject views and capture bookkeeping for a backtracking regex engine.
//!
//! A matcher written against this crate runs unchanged over text stored as
//! raw bytes, UTF-8 or UTF-32, and records, rolls back and finalizes capture
//! groups across arbitrarily deep backtracking.
//!
//! ## Quick Start
//!
//! ```rust
//! use regmatch::prelude::*;
//!
//! let subject = "foo123";
//! let input = MatchInput::new(subject);
//! let mut state = MatchState::new(0, 1);
//! let mut context = MatchContext::new();
//!
//! // Fork before entering group 1, then capture "123".
//! context.push_checkpoint(state.checkpoint(0)).unwrap();
//! state.record_capture(1, MatchFragment::from_input(&input, 3, 3).unwrap());
//! assert_eq!(state.captures(1).unwrap().len(), 1);
//!
//! // Backtracking to the fork point drops the capture again.
//! assert!(context.backtrack(&mut state));
//! assert_eq!(state.captures(1).unwrap().len(), 0);
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`regview`] | `EncodedView` over ByteView / Utf8View / Utf32View |
//! | [`encodings`] | Per-encoding primitives behind the views |
//! | [`regmatch`] | Fragments, match input, per-attempt state, output |
//! | [`regexec`] | Call context, `Executor` seam, `search` driver |
//! | [`options`] | Match flags, limits, named-capture policy |
//! | [`error`] | `MatchError` |

// Logging is compiled out unless the `logging` feature is enabled.
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

pub mod encodings;
pub mod error;
pub mod options;
pub mod prelude;
pub mod regexec;
pub mod regmatch;
pub mod regview;
