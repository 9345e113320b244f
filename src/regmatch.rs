// regmatch.rs - Match bookkeeping: fragments, request, per-attempt state, output.
//
// MatchInput describes one top-level call and never changes. MatchState is
// the per-attempt scratch space an executor mutates; it records captures and
// can snapshot / restore their lengths, but never undoes anything on its own.
// MatchOutput is built only from a successful MatchState (or empty).

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;

use crate::error::{trap, MatchError};
use crate::options::{MatchOptions, NamedCapturePolicy};
use crate::regview::{EncodedView, OwnedView, ViewBuf};

// ============================================================================
// MatchFragment
// ============================================================================

/// One recorded span of the subject plus its position metadata.
#[derive(Clone, Debug, Default)]
pub struct MatchFragment<'a> {
    text: ViewBuf<'a>,
    pub line: usize,
    pub column: usize,
    pub global_offset: usize,
    /// Column at which the fragment began; unaffected by later updates to `column`.
    pub left_column: usize,
}

impl<'a> MatchFragment<'a> {
    pub fn new(view: EncodedView<'a>, line: usize, column: usize, global_offset: usize) -> Self {
        MatchFragment {
            text: ViewBuf::Borrowed(view),
            line,
            column,
            global_offset,
            left_column: column,
        }
    }

    /// A fragment that owns its text, e.g. one synthesized from raw code points.
    pub fn from_owned(owned: OwnedView, line: usize, column: usize, global_offset: usize) -> Self {
        MatchFragment {
            text: ViewBuf::Owned(owned),
            line,
            column,
            global_offset,
            left_column: column,
        }
    }

    /// Slice `length` units at `start` out of the call's subject, with
    /// column and global offset measured from the input's own origin.
    pub fn from_input(
        input: &MatchInput<'a>,
        start: usize,
        length: usize,
    ) -> Result<Self, MatchError> {
        let view = input.view().try_substring_view(start, length)?;
        Ok(MatchFragment::new(
            view,
            input.line(),
            input.column() + start,
            input.global_offset() + start,
        ))
    }

    pub fn view(&self) -> EncodedView<'_> {
        self.text.view()
    }

    pub fn is_null(&self) -> bool {
        self.view().is_null()
    }

    pub fn owns_text(&self) -> bool {
        self.text.is_owned()
    }
}

impl fmt::Display for MatchFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" at {}:{}", self.view(), self.line, self.left_column)
    }
}

// ============================================================================
// MatchInput
// ============================================================================

/// Description of one top-level match call. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct MatchInput<'a> {
    view: EncodedView<'a>,
    options: MatchOptions,
    start_offset: usize,
    match_index: usize,
    line: usize,
    column: usize,
    global_offset: usize,
}

impl<'a> MatchInput<'a> {
    pub fn new(view: impl Into<EncodedView<'a>>) -> Self {
        MatchInput {
            view: view.into(),
            ..MatchInput::default()
        }
    }

    pub fn builder(view: impl Into<EncodedView<'a>>) -> MatchInputBuilder<'a> {
        MatchInputBuilder::new(view)
    }

    pub fn view(&self) -> EncodedView<'a> {
        self.view
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// First offset the call may attempt, in the view's units.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn match_index(&self) -> usize {
        self.match_index
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Offset of this subject within a larger text (multi-line matching).
    pub fn global_offset(&self) -> usize {
        self.global_offset
    }
}

/// Builder for [`MatchInput`].
///
/// ```
/// use regmatch::options::MatchOptions;
/// use regmatch::regmatch::MatchInput;
///
/// let input = MatchInput::builder("foo\nbar")
///     .options(MatchOptions::MULTILINE)
///     .start_offset(4)
///     .line(1)
///     .build();
/// assert_eq!(input.start_offset(), 4);
/// assert!(input.options().contains(MatchOptions::MULTILINE));
/// ```
pub struct MatchInputBuilder<'a> {
    input: MatchInput<'a>,
}

impl<'a> MatchInputBuilder<'a> {
    pub fn new(view: impl Into<EncodedView<'a>>) -> Self {
        MatchInputBuilder {
            input: MatchInput::new(view),
        }
    }

    pub fn options(mut self, options: MatchOptions) -> Self {
        self.input.options = options;
        self
    }

    pub fn start_offset(mut self, offset: usize) -> Self {
        self.input.start_offset = offset;
        self
    }

    pub fn match_index(mut self, index: usize) -> Self {
        self.input.match_index = index;
        self
    }

    pub fn line(mut self, line: usize) -> Self {
        self.input.line = line;
        self
    }

    pub fn column(mut self, column: usize) -> Self {
        self.input.column = column;
        self
    }

    pub fn global_offset(mut self, offset: usize) -> Self {
        self.input.global_offset = offset;
        self
    }

    pub fn build(self) -> MatchInput<'a> {
        self.input
    }
}

// ============================================================================
// Checkpoint
// ============================================================================

/// Saved state an executor can restore to try an alternative path.
///
/// Holds positions and the lengths of every capture sequence at the time
/// of the fork, not the captures themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub string_position: usize,
    /// Instruction the alternative path resumes at.
    pub instruction_position: usize,
    match_count: usize,
    capture_lengths: SmallVec<[usize; 8]>,
    named_map_count: usize,
    named_journal_len: usize,
}

impl Checkpoint {
    pub fn capture_lengths(&self) -> &[usize] {
        &self.capture_lengths
    }
}

/// Undo record for one named binding.
#[derive(Clone, Debug)]
struct NamedBinding<'a> {
    match_index: usize,
    name: String,
    previous: Option<MatchFragment<'a>>,
}

// ============================================================================
// MatchState
// ============================================================================

/// Mutable state of one attempt (one trial start offset).
#[derive(Clone, Debug)]
pub struct MatchState<'a> {
    pub string_position_before_match: usize,
    pub string_position: usize,
    pub instruction_position: usize,
    pub fork_at_position: usize,
    matches: Vec<MatchFragment<'a>>,
    capture_group_matches: Vec<Vec<MatchFragment<'a>>>,
    named_capture_group_matches: Vec<HashMap<String, MatchFragment<'a>>>,
    named_journal: Vec<NamedBinding<'a>>,
    policy: NamedCapturePolicy,
}

impl<'a> MatchState<'a> {
    /// Fresh state for an attempt at `start`. Every capture sequence starts
    /// empty; groups are numbered `1..=group_count`.
    pub fn new(start: usize, group_count: usize) -> Self {
        MatchState {
            string_position_before_match: start,
            string_position: start,
            instruction_position: 0,
            fork_at_position: 0,
            matches: Vec::new(),
            capture_group_matches: vec![Vec::new(); group_count],
            named_capture_group_matches: Vec::new(),
            named_journal: Vec::new(),
            policy: NamedCapturePolicy::default(),
        }
    }

    pub fn with_named_policy(mut self, policy: NamedCapturePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn named_policy(&self) -> NamedCapturePolicy {
        self.policy
    }

    pub fn group_count(&self) -> usize {
        self.capture_group_matches.len()
    }

    pub fn matches(&self) -> &[MatchFragment<'a>] {
        &self.matches
    }

    /// Capture sequences; index `i` holds group `i + 1`.
    pub fn capture_group_matches(&self) -> &[Vec<MatchFragment<'a>>] {
        &self.capture_group_matches
    }

    pub fn named_capture_group_matches(&self) -> &[HashMap<String, MatchFragment<'a>>] {
        &self.named_capture_group_matches
    }

    /// Captures recorded so far for `group` (1-based).
    pub fn captures(&self, group: usize) -> Option<&[MatchFragment<'a>]> {
        let index = group.checked_sub(1)?;
        self.capture_group_matches.get(index).map(Vec::as_slice)
    }

    pub fn push_match(&mut self, fragment: MatchFragment<'a>) {
        self.matches.push(fragment);
    }

    /// Append a capture to `group`'s sequence.
    ///
    /// # Panics
    ///
    /// Panics if `group` is 0 or greater than the group count.
    #[track_caller]
    pub fn record_capture(&mut self, group: usize, fragment: MatchFragment<'a>) {
        self.try_record_capture(group, fragment)
            .unwrap_or_else(|e| trap(e))
    }

    pub fn try_record_capture(
        &mut self,
        group: usize,
        fragment: MatchFragment<'a>,
    ) -> Result<(), MatchError> {
        let group_count = self.capture_group_matches.len();
        let slot = group
            .checked_sub(1)
            .and_then(|i| self.capture_group_matches.get_mut(i))
            .ok_or(MatchError::UnknownGroup { group, group_count })?;
        slot.push(fragment);
        Ok(())
    }

    /// Bind `name` in the map of match `match_index`, applying the named
    /// capture policy. Returns whether the binding took effect.
    pub fn bind_named(
        &mut self,
        match_index: usize,
        name: &str,
        fragment: MatchFragment<'a>,
    ) -> bool {
        if self.named_capture_group_matches.len() <= match_index {
            self.named_capture_group_matches
                .resize_with(match_index + 1, HashMap::new);
        }
        let map = &mut self.named_capture_group_matches[match_index];
        if self.policy == NamedCapturePolicy::FirstWins && map.contains_key(name) {
            return false;
        }
        let previous = map.insert(name.to_string(), fragment);
        self.named_journal.push(NamedBinding {
            match_index,
            name: name.to_string(),
            previous,
        });
        true
    }

    pub fn named(&self, match_index: usize, name: &str) -> Option<&MatchFragment<'a>> {
        self.named_capture_group_matches
            .get(match_index)?
            .get(name)
    }

    /// Snapshot for a fork whose alternative resumes at `resume_at`.
    pub fn checkpoint(&self, resume_at: usize) -> Checkpoint {
        Checkpoint {
            string_position: self.string_position,
            instruction_position: resume_at,
            match_count: self.matches.len(),
            capture_lengths: self.capture_group_matches.iter().map(Vec::len).collect(),
            named_map_count: self.named_capture_group_matches.len(),
            named_journal_len: self.named_journal.len(),
        }
    }

    /// Roll back to `checkpoint`: restore positions, truncate every capture
    /// sequence to its recorded length, and revert named bindings made since.
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.string_position = checkpoint.string_position;
        self.instruction_position = checkpoint.instruction_position;
        self.fork_at_position = checkpoint.instruction_position;
        self.matches.truncate(checkpoint.match_count);
        for (seq, &len) in self
            .capture_group_matches
            .iter_mut()
            .zip(checkpoint.capture_lengths.iter())
        {
            seq.truncate(len);
        }
        while self.named_journal.len() > checkpoint.named_journal_len {
            let Some(binding) = self.named_journal.pop() else {
                break;
            };
            if let Some(map) = self.named_capture_group_matches.get_mut(binding.match_index) {
                match binding.previous {
                    Some(previous) => {
                        map.insert(binding.name, previous);
                    }
                    None => {
                        map.remove(&binding.name);
                    }
                }
            }
        }
        self.named_capture_group_matches
            .truncate(checkpoint.named_map_count);
    }

    /// Current length of every capture sequence.
    pub fn capture_lengths(&self) -> SmallVec<[usize; 8]> {
        self.capture_group_matches.iter().map(Vec::len).collect()
    }

    /// Move the recorded captures into a result. Consumes the attempt.
    pub fn finalize(self, operations: usize) -> MatchOutput<'a> {
        MatchOutput {
            operations,
            matches: self.matches,
            capture_group_matches: self.capture_group_matches,
            named_capture_group_matches: self.named_capture_group_matches,
        }
    }
}

// ============================================================================
// MatchOutput
// ============================================================================

/// Finalized outcome of one call. Empty when nothing matched.
#[derive(Clone, Debug, Default)]
pub struct MatchOutput<'a> {
    operations: usize,
    matches: Vec<MatchFragment<'a>>,
    capture_group_matches: Vec<Vec<MatchFragment<'a>>>,
    named_capture_group_matches: Vec<HashMap<String, MatchFragment<'a>>>,
}

impl<'a> MatchOutput<'a> {
    /// The "no match" result.
    pub fn empty() -> Self {
        MatchOutput::default()
    }

    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Executor steps taken over the whole call.
    pub fn operations(&self) -> usize {
        self.operations
    }

    pub fn matches(&self) -> &[MatchFragment<'a>] {
        &self.matches
    }

    /// Capture sequences; index `i` holds group `i + 1`.
    pub fn capture_group_matches(&self) -> &[Vec<MatchFragment<'a>>] {
        &self.capture_group_matches
    }

    pub fn named_capture_group_matches(&self) -> &[HashMap<String, MatchFragment<'a>>] {
        &self.named_capture_group_matches
    }

    /// Last capture recorded for `group` (1-based).
    pub fn capture(&self, group: usize) -> Option<&MatchFragment<'a>> {
        self.capture_group_matches
            .get(group.checked_sub(1)?)?
            .last()
    }

    pub fn named(&self, match_index: usize, name: &str) -> Option<&MatchFragment<'a>> {
        self.named_capture_group_matches
            .get(match_index)?
            .get(name)
    }
}

impl fmt::Display for MatchOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_match() {
            return f.write_str("no match");
        }
        writeln!(f, "operations: {}", self.operations)?;
        for (i, m) in self.matches.iter().enumerate() {
            writeln!(f, "match {}: {}", i, m)?;
        }
        for (i, seq) in self.capture_group_matches.iter().enumerate() {
            write!(f, "group {}:", i + 1)?;
            for m in seq {
                write!(f, " {}", m)?;
            }
            writeln!(f)?;
        }
        for (i, map) in self.named_capture_group_matches.iter().enumerate() {
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                writeln!(f, "match {} <{}>: {}", i, name, map[name])?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regview::ViewKind;

    fn frag(text: &str, column: usize) -> MatchFragment<'_> {
        MatchFragment::new(EncodedView::from(text), 0, column, column)
    }

    #[test]
    fn default_fragment_is_null() {
        let m = MatchFragment::default();
        assert!(m.is_null());
        assert_eq!(m.line, 0);
        assert_eq!(m.left_column, 0);
    }

    #[test]
    fn left_column_is_frozen() {
        let mut m = frag("abc", 4);
        m.column += 10;
        m.line += 1;
        assert_eq!(m.left_column, 4);
        assert_eq!(m.column, 14);
    }

    #[test]
    fn owned_fragment_keeps_its_text() {
        let owned = OwnedView::from_code_points(ViewKind::Utf8, &[0x31, 0x32]);
        let m = MatchFragment::from_owned(owned, 2, 3, 7);
        let copy = m.clone();
        drop(m);
        assert!(copy.owns_text());
        assert_eq!(copy.view(), "12");
        assert_eq!(copy.to_string(), "\"12\" at 2:3");
    }

    #[test]
    fn fragment_from_input_positions() {
        let input = MatchInput::builder("xxfoo").column(3).global_offset(100).line(2).build();
        let m = MatchFragment::from_input(&input, 2, 3).unwrap();
        assert_eq!(m.view(), "foo");
        assert_eq!(m.line, 2);
        assert_eq!(m.column, 5);
        assert_eq!(m.left_column, 5);
        assert_eq!(m.global_offset, 102);
        assert!(MatchFragment::from_input(&input, 4, 3).is_err());
    }

    #[test]
    fn input_builder_defaults() {
        let input = MatchInput::new("abc");
        assert_eq!(input.start_offset(), 0);
        assert_eq!(input.match_index(), 0);
        assert_eq!(input.options(), MatchOptions::empty());
        assert_eq!(input.view(), "abc");
    }

    #[test]
    fn new_state_starts_empty() {
        let state = MatchState::new(3, 2);
        assert_eq!(state.string_position, 3);
        assert_eq!(state.string_position_before_match, 3);
        assert_eq!(state.group_count(), 2);
        assert!(state.capture_group_matches().iter().all(Vec::is_empty));
        assert!(state.matches().is_empty());
        assert!(state.named_capture_group_matches().is_empty());
    }

    #[test]
    fn record_capture_by_group_number() {
        let mut state = MatchState::new(0, 2);
        state.record_capture(2, frag("b", 1));
        state.record_capture(2, frag("c", 2));
        assert_eq!(state.captures(1).map(<[_]>::len), Some(0));
        assert_eq!(state.captures(2).map(<[_]>::len), Some(2));
        assert!(state.captures(0).is_none());
        assert!(state.captures(3).is_none());
    }

    #[test]
    fn record_unknown_group() {
        let mut state = MatchState::new(0, 1);
        assert_eq!(
            state.try_record_capture(0, frag("a", 0)),
            Err(MatchError::UnknownGroup { group: 0, group_count: 1 })
        );
        assert_eq!(
            state.try_record_capture(2, frag("a", 0)),
            Err(MatchError::UnknownGroup { group: 2, group_count: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "capture group 5 out of range")]
    fn record_unknown_group_traps() {
        MatchState::new(0, 1).record_capture(5, frag("a", 0));
    }

    #[test]
    fn restore_truncates_captures() {
        let mut state = MatchState::new(0, 2);
        state.record_capture(1, frag("a", 0));
        let cp = state.checkpoint(7);
        assert_eq!(cp.capture_lengths(), &[1, 0]);

        state.string_position = 5;
        state.record_capture(1, frag("b", 1));
        state.record_capture(2, frag("c", 2));
        state.push_match(frag("abc", 0));

        state.restore(&cp);
        assert_eq!(state.string_position, 0);
        assert_eq!(state.instruction_position, 7);
        assert_eq!(state.fork_at_position, 7);
        assert_eq!(state.capture_lengths().as_slice(), &[1, 0]);
        assert!(state.matches().is_empty());
    }

    #[test]
    fn named_last_wins_and_rollback() {
        let mut state = MatchState::new(0, 2);
        assert!(state.bind_named(0, "x", frag("first", 0)));
        let cp = state.checkpoint(0);
        assert!(state.bind_named(0, "x", frag("second", 5)));
        assert!(state.bind_named(0, "y", frag("other", 9)));
        assert_eq!(state.named(0, "x").map(|m| m.view().to_string()), Some("second".into()));

        state.restore(&cp);
        assert_eq!(state.named(0, "x").map(|m| m.view().to_string()), Some("first".into()));
        assert!(state.named(0, "y").is_none());
    }

    #[test]
    fn named_first_wins() {
        let mut state = MatchState::new(0, 2).with_named_policy(NamedCapturePolicy::FirstWins);
        assert!(state.bind_named(0, "x", frag("first", 0)));
        assert!(!state.bind_named(0, "x", frag("second", 5)));
        assert_eq!(state.named(0, "x").map(|m| m.view().to_string()), Some("first".into()));
    }

    #[test]
    fn restore_drops_maps_created_after_checkpoint() {
        let mut state = MatchState::new(0, 0);
        let cp = state.checkpoint(0);
        state.bind_named(2, "x", frag("a", 0));
        assert_eq!(state.named_capture_group_matches().len(), 3);
        state.restore(&cp);
        assert!(state.named_capture_group_matches().is_empty());
    }

    #[test]
    fn finalize_copies_verbatim() {
        let mut state = MatchState::new(0, 1);
        state.record_capture(1, frag("123", 3));
        state.bind_named(0, "n", frag("123", 3));
        state.push_match(frag("foo123", 0));
        let out = state.finalize(42);
        assert!(out.is_match());
        assert_eq!(out.operations(), 42);
        assert_eq!(out.matches().len(), 1);
        assert_eq!(out.capture(1).map(|m| m.view().to_string()), Some("123".into()));
        assert_eq!(out.named(0, "n").map(|m| m.column), Some(3));
        assert!(out.capture(2).is_none());
    }

    #[test]
    fn empty_output() {
        let out = MatchOutput::empty();
        assert!(!out.is_match());
        assert_eq!(out.operations(), 0);
        assert!(out.capture_group_matches().is_empty());
        assert_eq!(out.to_string(), "no match");
    }

    #[test]
    fn output_display() {
        let mut state = MatchState::new(0, 1);
        state.record_capture(1, frag("1", 3));
        state.push_match(frag("ab1", 1));
        let text = state.finalize(5).to_string();
        assert!(text.contains("operations: 5"));
        assert!(text.contains("match 0: \"ab1\" at 0:1"));
        assert!(text.contains("group 1: \"1\" at 0:3"));
    }
}
