// options.rs - Match flags, limits and named-capture policy.
//
// The flag bundle is opaque to the bookkeeping layer: it is carried through
// MatchInput unchanged for the executor. Only the search driver reads
// STICKY. Limits follow the process-wide default + per-call override scheme.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Matching flags handed from the options parser to the executor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MatchOptions: u32 {
        const GLOBAL = 1;
        const INSENSITIVE = 1 << 1;
        const UNGREEDY = 1 << 2;
        const UNICODE = 1 << 3;
        const EXTENDED = 1 << 4;
        const EXTRA = 1 << 5;
        const MULTILINE = 1 << 6;
        const SINGLE_LINE = 1 << 7;
        /// Only attempt a match at the start offset.
        const STICKY = 1 << 8;
        const NO_SUB_EXPRESSIONS = 1 << 9;
        /// Start offset is carried over between calls by the caller.
        const INTERNAL_STATEFUL = 1 << 10;
    }
}

// ============================================================================
// Limits
// ============================================================================

pub const DEFAULT_RETRY_LIMIT_IN_MATCH: u64 = 10_000_000;
pub const DEFAULT_MATCH_STACK_LIMIT_SIZE: usize = 0;

static RETRY_LIMIT_IN_MATCH: AtomicU64 = AtomicU64::new(DEFAULT_RETRY_LIMIT_IN_MATCH);
static MATCH_STACK_LIMIT: AtomicUsize = AtomicUsize::new(DEFAULT_MATCH_STACK_LIMIT_SIZE);

pub fn set_retry_limit_in_match(n: u64) { RETRY_LIMIT_IN_MATCH.store(n, Ordering::Relaxed); }
pub fn get_retry_limit_in_match() -> u64 { RETRY_LIMIT_IN_MATCH.load(Ordering::Relaxed) }
pub fn set_match_stack_limit(n: usize) { MATCH_STACK_LIMIT.store(n, Ordering::Relaxed); }
pub fn get_match_stack_limit() -> usize { MATCH_STACK_LIMIT.load(Ordering::Relaxed) }

/// Ceilings the search driver compares the call's bookkeeping against.
/// Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum failed instruction executions across one call.
    pub retry_limit_in_match: u64,
    /// Maximum checkpoint stack depth.
    pub match_stack_limit: usize,
}

impl Default for MatchLimits {
    /// Snapshot of the process-wide limits.
    fn default() -> Self {
        MatchLimits {
            retry_limit_in_match: get_retry_limit_in_match(),
            match_stack_limit: get_match_stack_limit(),
        }
    }
}

impl MatchLimits {
    pub fn unlimited() -> Self {
        MatchLimits {
            retry_limit_in_match: 0,
            match_stack_limit: 0,
        }
    }

    pub fn retry_limit_in_match(mut self, n: u64) -> Self {
        self.retry_limit_in_match = n;
        self
    }

    pub fn match_stack_limit(mut self, n: usize) -> Self {
        self.match_stack_limit = n;
        self
    }

    #[inline]
    pub fn retry_exceeded(&self, failures: u64) -> bool {
        self.retry_limit_in_match != 0 && failures > self.retry_limit_in_match
    }
}

/// What happens when a name that already has a capture in the current match
/// is bound again (two groups sharing one name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamedCapturePolicy {
    /// The later binding replaces the earlier one.
    #[default]
    LastWins,
    /// The first binding is kept; later ones are ignored.
    FirstWins,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_plain_flags() {
        let opts = MatchOptions::GLOBAL | MatchOptions::STICKY;
        assert!(opts.contains(MatchOptions::STICKY));
        assert!(!opts.contains(MatchOptions::INSENSITIVE));
        assert_eq!(MatchOptions::default(), MatchOptions::empty());
    }

    #[test]
    fn retry_limit_zero_is_unlimited() {
        let limits = MatchLimits::unlimited();
        assert!(!limits.retry_exceeded(u64::MAX));
    }

    #[test]
    fn retry_limit_is_exclusive() {
        let limits = MatchLimits::unlimited().retry_limit_in_match(3);
        assert!(!limits.retry_exceeded(3));
        assert!(limits.retry_exceeded(4));
    }

    #[test]
    fn default_limits_from_globals() {
        let limits = MatchLimits::default();
        assert_eq!(limits.retry_limit_in_match, get_retry_limit_in_match());
        assert_eq!(limits.match_stack_limit, get_match_stack_limit());
    }

    #[test]
    fn named_policy_default() {
        assert_eq!(NamedCapturePolicy::default(), NamedCapturePolicy::LastWins);
    }
}
