//! Flow services for the Setu client.
//!
//! Each flow from the UI owns its state exclusively and talks to the
//! terminology service through a capability trait from `setu-core`, so
//! every service here is testable with an in-process fake. Asynchronous
//! results (debounced suggestions, translation, AI polling) are pushed to
//! the frontend as [`FlowEvent`]s over an unbounded channel; the frontend
//! applies them to its [`Workbench`] view state and renders.

pub mod assistant;
pub mod condition;
pub mod events;
pub mod session;
pub mod state;
pub mod suggest;
pub mod translate;

pub use assistant::AssistantService;
pub use condition::ConditionService;
pub use events::FlowEvent;
pub use session::SessionService;
pub use state::Workbench;
pub use suggest::SuggestionService;
pub use translate::TranslationService;
