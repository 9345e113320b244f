// regexec.rs - Call context and the search driver.
//
// MatchContext carries the bookkeeping that spans every attempt of one call:
// the fail counter, the step counter and the checkpoint stack. The executor
// (bytecode interpreter) plugs in through the Executor trait; `search` is
// the caller-side loop that tries start offsets forward, one MatchState per
// attempt, and turns the first success into a MatchOutput.

use crate::error::MatchError;
use crate::options::{MatchLimits, MatchOptions, NamedCapturePolicy};
use crate::regmatch::{Checkpoint, MatchFragment, MatchInput, MatchOutput, MatchState};

// ============================================================================
// MatchContext
// ============================================================================

/// Per-call mutable bookkeeping, threaded explicitly through the executor.
///
/// Not shareable across threads while a call is running: one executor owns a
/// context for the duration of one call.
#[derive(Debug, Default)]
pub struct MatchContext {
    fail_counter: u64,
    operations: usize,
    checkpoints: Vec<Checkpoint>,
    stack_limit: usize,
}

impl MatchContext {
    pub fn new() -> Self {
        MatchContext::default()
    }

    /// Context whose checkpoint stack refuses to grow past `limit` (0 = unlimited).
    pub fn with_stack_limit(limit: usize) -> Self {
        MatchContext {
            stack_limit: limit,
            ..MatchContext::default()
        }
    }

    /// Count one executed instruction.
    #[inline]
    pub fn step(&mut self) {
        self.operations += 1;
    }

    pub fn operations(&self) -> usize {
        self.operations
    }

    /// Count one failed instruction. Returns the new total.
    #[inline]
    pub fn fail(&mut self) -> u64 {
        self.fail_counter += 1;
        self.fail_counter
    }

    /// Failed instructions across every attempt of this call so far.
    pub fn fail_count(&self) -> u64 {
        self.fail_counter
    }

    /// Push a fork point.
    pub fn push_checkpoint(&mut self, checkpoint: Checkpoint) -> Result<(), MatchError> {
        if self.stack_limit != 0 && self.checkpoints.len() >= self.stack_limit {
            return Err(MatchError::MatchStackLimitOver {
                limit: self.stack_limit,
            });
        }
        self.checkpoints.push(checkpoint);
        Ok(())
    }

    pub fn pop_checkpoint(&mut self) -> Option<Checkpoint> {
        self.checkpoints.pop()
    }

    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Drop every pending fork point once the call's outcome is decided.
    pub fn clear_checkpoints(&mut self) {
        self.checkpoints.clear();
    }

    /// Record a failure and roll `state` back to the most recent fork point.
    /// Returns false when no fork point is left, i.e. the attempt has failed.
    pub fn backtrack(&mut self, state: &mut MatchState<'_>) -> bool {
        self.fail();
        match self.checkpoints.pop() {
            Some(checkpoint) => {
                state.restore(&checkpoint);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Executor seam
// ============================================================================

/// Result of running one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt matched; `string_position` is the end of the match.
    Matched,
    /// Every alternative was exhausted.
    Failed,
}

/// A compiled program that can run one attempt against a MatchState.
pub trait Executor {
    /// Number of capture groups in the compiled program.
    fn capture_group_count(&self) -> usize;

    /// How repeated names are resolved; must agree with the compiler's
    /// naming table.
    fn named_capture_policy(&self) -> NamedCapturePolicy {
        NamedCapturePolicy::default()
    }

    /// Run from `state.string_position` / `state.instruction_position`
    /// until the attempt matches or runs out of alternatives.
    fn execute<'a>(
        &mut self,
        input: &MatchInput<'a>,
        state: &mut MatchState<'a>,
        context: &mut MatchContext,
    ) -> Result<AttemptOutcome, MatchError>;
}

// ============================================================================
// search
// ============================================================================

/// Find the first match at or after `input.start_offset()`.
///
/// Returns an empty output when nothing matches. With `STICKY`, only the
/// start offset itself is attempted. After a failed attempt the call is
/// abandoned once the fail counter has passed `limits`; a decided match is
/// always returned.
pub fn search<'a, E>(
    input: &MatchInput<'a>,
    executor: &mut E,
    limits: &MatchLimits,
) -> Result<MatchOutput<'a>, MatchError>
where
    E: Executor + ?Sized,
{
    let view_length = input.view().length();
    let group_count = executor.capture_group_count();
    let policy = executor.named_capture_policy();
    let mut context = MatchContext::with_stack_limit(limits.match_stack_limit);

    let first = input.start_offset();
    let last = if input.options().contains(MatchOptions::STICKY) {
        first
    } else {
        view_length
    };

    if first > view_length {
        log_debug!("start offset {} past end {}", first, view_length);
        return Ok(MatchOutput::empty());
    }

    for offset in first..=last {
        log_trace!("attempt at offset {}", offset);
        let mut state = MatchState::new(offset, group_count).with_named_policy(policy);
        let outcome = executor.execute(input, &mut state, &mut context)?;

        match outcome {
            AttemptOutcome::Matched => {
                context.clear_checkpoints();
                let start = state.string_position_before_match;
                let length = state.string_position.checked_sub(start).ok_or(
                    MatchError::IndexOutOfRange {
                        index: state.string_position,
                        length: start,
                    },
                )?;
                let whole = MatchFragment::from_input(input, start, length)?;
                state.push_match(whole);
                log_debug!(
                    "matched at {}..{} after {} operations",
                    start,
                    start + length,
                    context.operations()
                );
                return Ok(state.finalize(context.operations()));
            }
            AttemptOutcome::Failed => {
                if context.checkpoint_depth() != 0 {
                    return Err(MatchError::UnbalancedCheckpoints {
                        depth: context.checkpoint_depth(),
                    });
                }
                if limits.retry_exceeded(context.fail_count()) {
                    log_debug!(
                        "abandoning call: {} failures over limit {}",
                        context.fail_count(),
                        limits.retry_limit_in_match
                    );
                    return Err(MatchError::RetryLimitInMatchOver {
                        limit: limits.retry_limit_in_match,
                        failures: context.fail_count(),
                    });
                }
            }
        }
    }

    log_debug!(
        "no match; {} operations, {} failures",
        context.operations(),
        context.fail_count()
    );
    Ok(MatchOutput::empty())
}

// ============================================================================
// Tests
// ============================================================================
