//! Search-suggestion flow: the debounce state machine.

pub mod debounce;

pub use debounce::{Debouncer, FetchTicket, InputAction, DEBOUNCE_DELAY, MIN_QUERY_LEN};
