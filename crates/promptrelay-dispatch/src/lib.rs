//! # promptrelay-dispatch
//!
//! The platform dispatcher: delivers an assembled prompt to a platform by
//! either opening a tab at a prompt-embedding URL, or resolving a tab for
//! the platform's origin, waiting for navigation to settle on the
//! destination path, and injecting an in-page routine that fills the chat
//! input and clicks send.
//!
//! Each dispatch owns its state machine value
//! (`Idle → ResolvingTab → AwaitingNavigation → Injected → {Filled,
//! FillTimedOut} → {Sent, SendSkipped}`); there is no shared mutable
//! dispatch state and dropping the dispatch future cancels any wait.

mod dispatcher;
mod error;
mod script;
mod tabs;

pub use dispatcher::{DispatchOutcome, DispatchPhase, Dispatcher, Tuning};
pub use error::DispatchError;
pub use script::{build_fill_script, FillOutcome};
pub use tabs::{find_page_for_origin, nav_target_reached};
