//! The platform dispatcher.

use std::sync::Arc;
use std::time::Duration;

use promptrelay_cdp::{Browser, CdpClient, PageInfo, PageSession};
use promptrelay_core::{destination_url, poll_until, Platform};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::DispatchError;
use crate::script::{build_fill_script, FillOutcome};
use crate::tabs::{find_page_for_origin, nav_target_reached};

/// Dispatch tuning constants.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Interval between navigation-state checks.
    pub nav_poll_interval: Duration,
    /// How long to wait for the destination page.
    pub nav_deadline: Duration,
    /// In-page interval between input-element lookups.
    pub fill_poll_interval: Duration,
    /// In-page attempt budget for the input lookup.
    pub fill_max_attempts: u32,
    /// In-page delay before the send click, and between its retries.
    pub settle_delay: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            nav_poll_interval: Duration::from_millis(100),
            nav_deadline: Duration::from_secs(30),
            fill_poll_interval: Duration::from_millis(250),
            fill_max_attempts: 40,
            settle_delay: Duration::from_millis(200),
        }
    }
}

/// Lifecycle of one dispatch. Transitions are one-directional; only the
/// in-page fill poll and send click carry (bounded) retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    ResolvingTab,
    AwaitingNavigation,
    Injected,
    Filled,
    FillTimedOut,
    Sent,
    SendSkipped,
}

/// Terminal result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// URL-addressable platform: a tab was opened at this URL.
    UrlOpened(String),
    /// Prompt filled and the send button clicked.
    Sent,
    /// Prompt filled but the send button was missing, disabled or not
    /// configured; the user sends manually.
    SendSkipped,
    /// The input element never appeared; nothing was changed on the page.
    FillTimedOut,
}

/// State of one dispatch in flight, owned by its caller.
struct Dispatch {
    platform_key: String,
    phase: DispatchPhase,
}

impl Dispatch {
    fn new(platform_key: &str) -> Self {
        Self {
            platform_key: platform_key.to_string(),
            phase: DispatchPhase::Idle,
        }
    }

    fn advance(&mut self, next: DispatchPhase) {
        debug!(
            platform = %self.platform_key,
            from = ?self.phase,
            to = ?next,
            "dispatch phase"
        );
        self.phase = next;
    }
}

/// Delivers assembled prompts to platforms through a shared [`Browser`].
pub struct Dispatcher {
    browser: Arc<Browser>,
    tuning: Tuning,
}

impl Dispatcher {
    pub fn new(browser: Arc<Browser>) -> Self {
        Self {
            browser,
            tuning: Tuning::default(),
        }
    }

    pub fn with_tuning(browser: Arc<Browser>, tuning: Tuning) -> Self {
        Self { browser, tuning }
    }

    /// Deliver `prompt` to `platform`.
    pub async fn dispatch(
        &self,
        platform: &Platform,
        prompt: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        if platform.requires_injection() {
            self.dispatch_injection(platform, prompt).await
        } else {
            self.dispatch_url(platform, prompt).await
        }
    }

    /// URL-addressable platform: open a tab at the prompt-embedding URL.
    /// No failure handling beyond surfacing the tab-creation error.
    async fn dispatch_url(
        &self,
        platform: &Platform,
        prompt: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let url = destination_url(platform, prompt);
        let client = self.browser.client().await?;
        let session = client.new_page(&url).await?;
        client.activate_page(session.target_id()).await?;

        info!(platform = %platform.key, %url, "opened prompt URL");
        Ok(DispatchOutcome::UrlOpened(url))
    }

    /// DOM-automation platform: resolve a tab, await navigation, inject.
    async fn dispatch_injection(
        &self,
        platform: &Platform,
        prompt: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let dest = platform.parsed_url().ok_or_else(|| DispatchError::InvalidUrl {
            key: platform.key.clone(),
            url: platform.url.clone(),
        })?;

        let mut dispatch = Dispatch::new(&platform.key);

        dispatch.advance(DispatchPhase::ResolvingTab);
        let client = self.browser.client().await?;
        let session = self.resolve_tab(&client, platform, &dest).await?;

        dispatch.advance(DispatchPhase::AwaitingNavigation);
        self.await_navigation(&session, &dest).await?;

        dispatch.advance(DispatchPhase::Injected);
        let script = build_fill_script(platform, prompt, &self.tuning)?;
        let value = session.evaluate(&script).await?;
        let fill = FillOutcome::from_value(&value)?;

        if !fill.filled {
            dispatch.advance(DispatchPhase::FillTimedOut);
            warn!(
                platform = %platform.key,
                selector = platform.input_selector.as_deref().unwrap_or(""),
                "input element never appeared; prompt not delivered"
            );
            return Ok(DispatchOutcome::FillTimedOut);
        }

        dispatch.advance(DispatchPhase::Filled);
        if fill.clicked {
            dispatch.advance(DispatchPhase::Sent);
            info!(platform = %platform.key, "prompt filled and sent");
            Ok(DispatchOutcome::Sent)
        } else {
            dispatch.advance(DispatchPhase::SendSkipped);
            info!(platform = %platform.key, "prompt filled, send left to the user");
            Ok(DispatchOutcome::SendSkipped)
        }
    }

    /// Reuse the first open tab on the destination origin, navigating and
    /// foregrounding it; any reuse failure (tab closed concurrently,
    /// attach rejected) falls back to creating a fresh tab. No retry
    /// beyond that single fallback.
    async fn resolve_tab(
        &self,
        client: &CdpClient,
        platform: &Platform,
        dest: &Url,
    ) -> Result<PageSession, DispatchError> {
        let pages = client.list_pages().await?;

        if let Some(page) = find_page_for_origin(&pages, dest) {
            debug!(platform = %platform.key, tab = %page.id, "reusing tab on matching origin");
            match self.reuse_tab(client, page, platform).await {
                Ok(session) => return Ok(session),
                Err(e) => {
                    warn!(tab = %page.id, error = %e, "tab reuse failed, creating a new tab");
                }
            }
        }

        Ok(client.new_page(&platform.url).await?)
    }

    async fn reuse_tab(
        &self,
        client: &CdpClient,
        page: &PageInfo,
        platform: &Platform,
    ) -> Result<PageSession, DispatchError> {
        let session = client.attach_page(&page.id).await?;
        session.navigate(&platform.url).await?;
        session.bring_to_front().await?;
        Ok(session)
    }

    /// Wait until the tab has finished loading and its path prefix-matches
    /// the destination. Expressed as a cancellable poll with a deadline;
    /// dropping the future abandons the wait cleanly.
    async fn await_navigation(
        &self,
        session: &PageSession,
        dest: &Url,
    ) -> Result<(), DispatchError> {
        let outcome = poll_until(
            self.tuning.nav_poll_interval,
            self.tuning.nav_deadline,
            move || async move {
                let state = session.ready_state().await.ok()?;
                if !load_complete(&state) {
                    return None;
                }
                let current = Url::parse(&session.get_url().await.ok()?).ok()?;
                nav_target_reached(&current, dest).then_some(())
            },
        )
        .await;

        outcome
            .into_option()
            .ok_or_else(|| DispatchError::NavigationTimeout(dest.to_string()))
    }
}

/// Injection requires the full load: chat UIs wire their send controls in
/// late scripts, so an interactive-but-loading document is not ready.
fn load_complete(ready_state: &str) -> bool {
    ready_state == "complete"
}
