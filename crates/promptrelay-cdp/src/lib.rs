//! # promptrelay-cdp
//!
//! Chrome DevTools Protocol plumbing for promptrelay: a WebSocket CDP
//! client, per-tab page sessions, and a browser manager that finds or
//! launches Chrome with remote debugging enabled.
//!
//! Start Chrome yourself with `--remote-debugging-port=9222` to reuse an
//! existing profile and its logged-in chat sessions; otherwise the manager
//! launches one with a persistent promptrelay profile.
//!
//! The surface is deliberately narrow: list tabs, create tabs, attach,
//! navigate, activate, and evaluate JavaScript. All DOM work happens
//! inside injected page scripts, not over the DOM domain.

mod browser;
mod client;
mod error;
mod protocol;
mod session;

pub use browser::{Browser, BrowserConfig};
pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
pub use session::PageSession;
