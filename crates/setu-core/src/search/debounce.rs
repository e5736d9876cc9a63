//! Sequence-tagged debouncer for the suggestion flow.
//!
//! The debounce contract: at most one outstanding suggestion request, and it
//! reflects the most recent input. Every input change is assigned a
//! monotonically increasing sequence number; a scheduled fetch only
//! dispatches if its sequence is still the newest when its delay elapses,
//! and a response is only applied if its sequence is still the newest
//! *dispatched* one. The second check closes the window where a slow, older
//! response could land after a newer one and overwrite fresher results.
//!
//! This type is pure state; the timer and the network call live in the
//! application layer, which drives it through
//! [`Debouncer::input_changed`] → [`Debouncer::try_dispatch`] →
//! [`Debouncer::should_apply`].

use std::time::Duration;

/// Delay between the last keystroke and the suggestion fetch.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Inputs shorter than this clear the suggestion list without a request.
pub const MIN_QUERY_LEN: usize = 2;

/// What the caller should do after an input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Input is below the minimum length: clear suggestions immediately,
    /// issue no request. Any pending or in-flight fetch is invalidated.
    Clear,
    /// Schedule a fetch for this ticket after [`Debouncer::delay`].
    Schedule(FetchTicket),
}

/// A scheduled fetch: the term to query and its sequence tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub term: String,
}

/// Timer-owning debounce state for the search input.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    min_len: usize,
    /// Newest sequence handed out by `input_changed`.
    latest: u64,
    /// Sequence of the newest fetch that actually dispatched, if any.
    dispatched: Option<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_timing(DEBOUNCE_DELAY, MIN_QUERY_LEN)
    }

    /// Custom delay and threshold, for tests.
    pub fn with_timing(delay: Duration, min_len: usize) -> Self {
        Self {
            delay,
            min_len,
            latest: 0,
            dispatched: None,
        }
    }

    /// The delay a scheduled ticket must wait before dispatching.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Registers an input change, superseding anything previously scheduled.
    pub fn input_changed(&mut self, term: &str) -> InputAction {
        self.latest += 1;
        if term.chars().count() < self.min_len {
            // Below-threshold input also invalidates in-flight responses:
            // cleared suggestions must not be resurrected by a late reply.
            self.dispatched = None;
            return InputAction::Clear;
        }
        InputAction::Schedule(FetchTicket {
            seq: self.latest,
            term: term.to_string(),
        })
    }

    /// Called when a ticket's delay has elapsed. Returns true if the ticket
    /// is still the newest and the fetch should go out; records it as the
    /// newest dispatched fetch.
    pub fn try_dispatch(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.seq != self.latest {
            return false;
        }
        self.dispatched = Some(ticket.seq);
        true
    }

    /// Called when a response arrives. True only for the newest dispatched
    /// fetch; anything older is stale and must be discarded.
    pub fn should_apply(&self, seq: u64) -> bool {
        self.dispatched == Some(seq)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(debouncer: &mut Debouncer, term: &str) -> FetchTicket {
        match debouncer.input_changed(term) {
            InputAction::Schedule(ticket) => ticket,
            InputAction::Clear => panic!("expected a scheduled fetch for {term:?}"),
        }
    }

    #[test]
    fn test_short_input_clears_without_request() {
        let mut debouncer = Debouncer::new();
        assert_eq!(debouncer.input_changed(""), InputAction::Clear);
        assert_eq!(debouncer.input_changed("j"), InputAction::Clear);
    }

    #[test]
    fn test_threshold_counts_chars_not_bytes() {
        let mut debouncer = Debouncer::new();
        // Two Devanagari characters are two chars even though they are six bytes.
        assert!(matches!(
            debouncer.input_changed("ज्व"),
            InputAction::Schedule(_)
        ));
    }

    #[test]
    fn test_rapid_input_dispatches_only_final_value() {
        let mut debouncer = Debouncer::new();
        let first = schedule(&mut debouncer, "jv");
        let second = schedule(&mut debouncer, "jva");
        let last = schedule(&mut debouncer, "jvara");

        // Delays elapse in scheduling order; only the last survives.
        assert!(!debouncer.try_dispatch(&first));
        assert!(!debouncer.try_dispatch(&second));
        assert!(debouncer.try_dispatch(&last));
        assert_eq!(last.term, "jvara");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut debouncer = Debouncer::new();
        let old = schedule(&mut debouncer, "jv");
        assert!(debouncer.try_dispatch(&old));

        // A newer fetch dispatches while the old response is in flight.
        let new = schedule(&mut debouncer, "jvara");
        assert!(debouncer.try_dispatch(&new));

        assert!(!debouncer.should_apply(old.seq));
        assert!(debouncer.should_apply(new.seq));
    }

    #[test]
    fn test_out_of_order_responses() {
        let mut debouncer = Debouncer::new();
        let old = schedule(&mut debouncer, "jv");
        assert!(debouncer.try_dispatch(&old));
        let new = schedule(&mut debouncer, "jvara");
        assert!(debouncer.try_dispatch(&new));

        // Newest response arrives first, stale one afterwards.
        assert!(debouncer.should_apply(new.seq));
        assert!(!debouncer.should_apply(old.seq));
    }

    #[test]
    fn test_clear_invalidates_in_flight_fetch() {
        let mut debouncer = Debouncer::new();
        let ticket = schedule(&mut debouncer, "jvara");
        assert!(debouncer.try_dispatch(&ticket));

        // User deletes the input back below the threshold.
        assert_eq!(debouncer.input_changed("j"), InputAction::Clear);
        assert!(!debouncer.should_apply(ticket.seq));
    }

    #[test]
    fn test_superseded_before_dispatch_never_applies() {
        let mut debouncer = Debouncer::new();
        let old = schedule(&mut debouncer, "jv");
        let _new = schedule(&mut debouncer, "jvara");

        assert!(!debouncer.try_dispatch(&old));
        assert!(!debouncer.should_apply(old.seq));
    }
}
