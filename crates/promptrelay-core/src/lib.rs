//! # promptrelay-core
//!
//! Data model and pure logic shared by the promptrelay crates: platform,
//! action and template descriptors, the prompt assembler, destination URL
//! building, the poll-until utility and the localization catalog.

mod assemble;
mod defaults;
mod i18n;
mod model;
mod poll;
mod urlbuild;

pub use assemble::{assemble, PromptContext};
pub use defaults::{builtin_actions, builtin_platforms, builtin_templates};
pub use i18n::{Catalog, CatalogError};
pub use model::{Action, Platform, Template, TemplateMap};
pub use poll::{poll_until, PollOutcome};
pub use urlbuild::destination_url;
