// prelude.rs - Convenient re-exports.
//
//! # Prelude
//!
//! ```
//! use regmatch::prelude::*;
//!
//! let view = EncodedView::from("a\nb\nc");
//! let lines: Vec<String> = view.lines().iter().map(|l| l.to_string()).collect();
//! assert_eq!(lines, ["a", "b", "c"]);
//! ```

pub use crate::error::MatchError;
pub use crate::options::{MatchLimits, MatchOptions, NamedCapturePolicy};
pub use crate::regexec::{search, AttemptOutcome, Executor, MatchContext};
pub use crate::regmatch::{
    Checkpoint, MatchFragment, MatchInput, MatchInputBuilder, MatchOutput, MatchState,
};
pub use crate::regview::{EncodedView, OwnedView, ViewBuf, ViewKind};
