//! Shared page-interaction helpers.
//!
//! `PageActions` is the single place driver-call convention lives: strict
//! single-match resolution, scroll-before-fill, navigation logging, and the
//! click-vs-settlement race. Concrete page objects embed one instance
//! (composition, not inheritance) and add only their own descriptors and
//! business operations, so a new page never touches driver semantics.

use crate::descriptor::ElementDescriptor;
use crate::driver::{
    Driver, ElementHandle, ElementState, LoadState, UrlPattern, DEFAULT_ELEMENT_TIMEOUT,
    DEFAULT_NAVIGATION_TIMEOUT,
};
use crate::result::{HarnessError, HarnessResult};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Driver-interaction helper shared by all page objects.
///
/// Cheap to clone: all page objects of one test share the same driver
/// instance through it.
#[derive(Clone)]
pub struct PageActions {
    driver: Arc<dyn Driver>,
    base_url: Url,
}

impl std::fmt::Debug for PageActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageActions")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl PageActions {
    /// Bind a driver handle to an environment base URL
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, base_url: Url) -> Self {
        Self { driver, base_url }
    }

    /// The underlying driver handle
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// The environment base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Navigate to a path relative to the base URL.
    ///
    /// Logs the destination and the resulting URL; navigation failures are
    /// logged and re-raised, never swallowed.
    pub async fn navigate(&self, relative_path: &str) -> HarnessResult<()> {
        let target = self
            .base_url
            .join(relative_path)
            .map_err(|e| HarnessError::Navigation {
                url: relative_path.to_string(),
                message: format!("cannot resolve against {}: {e}", self.base_url),
            })?;
        tracing::debug!(path = relative_path, url = %target, "navigating");
        if let Err(e) = self.driver.navigate(target.as_str()).await {
            tracing::error!(url = %target, error = %e, "navigation failed");
            return Err(e);
        }
        let landed = self.driver.current_url().await?;
        tracing::debug!(url = %landed, "navigation complete");
        Ok(())
    }

    /// Wait until the descriptor is visible
    pub async fn wait_for_visible(
        &self,
        descriptor: &ElementDescriptor,
        timeout: Option<Duration>,
    ) -> HarnessResult<()> {
        self.driver
            .wait_for(
                descriptor,
                ElementState::Visible,
                timeout.unwrap_or(DEFAULT_ELEMENT_TIMEOUT),
            )
            .await
    }

    /// Wait until the descriptor is hidden or absent
    pub async fn wait_for_hidden(
        &self,
        descriptor: &ElementDescriptor,
        timeout: Option<Duration>,
    ) -> HarnessResult<()> {
        self.driver
            .wait_for(
                descriptor,
                ElementState::Hidden,
                timeout.unwrap_or(DEFAULT_ELEMENT_TIMEOUT),
            )
            .await
    }

    /// Resolve a descriptor that must match exactly one element.
    ///
    /// # Errors
    ///
    /// `MultipleMatches` when the descriptor matches more than one element,
    /// `Driver` when it matches none.
    async fn resolve_single(&self, descriptor: &ElementDescriptor) -> HarnessResult<ElementHandle> {
        let mut handles = self.driver.find(descriptor).await?;
        match handles.len() {
            1 => Ok(handles.remove(0)),
            0 => Err(HarnessError::Driver {
                message: format!("no element matches {descriptor}"),
            }),
            n => Err(HarnessError::MultipleMatches {
                descriptor: descriptor.to_string(),
                count: n,
            }),
        }
    }

    /// Scroll the target into view, then set its value.
    ///
    /// Assumes a single-match descriptor; raises `MultipleMatches` otherwise.
    pub async fn fill(&self, descriptor: &ElementDescriptor, value: &str) -> HarnessResult<()> {
        let handle = self.resolve_single(descriptor).await?;
        self.driver.scroll_into_view(&handle).await?;
        self.driver.fill(&handle, value).await
    }

    /// Click the target, optionally awaiting navigation settlement.
    ///
    /// When `await_navigation` is set, a timeout of the network-idle wait is
    /// swallowed (some clicks do not navigate); a click failure never is.
    pub async fn click(
        &self,
        descriptor: &ElementDescriptor,
        await_navigation: bool,
    ) -> HarnessResult<()> {
        let handle = self.resolve_single(descriptor).await?;
        self.driver.click(&handle).await?;
        if await_navigation {
            match self
                .driver
                .wait_for_load_state(LoadState::NetworkIdle, DEFAULT_NAVIGATION_TIMEOUT)
                .await
            {
                Err(e) if e.is_timeout() => {
                    tracing::debug!(descriptor = %descriptor, "click did not navigate");
                }
                other => other?,
            }
        }
        Ok(())
    }

    /// Number of elements currently matching the descriptor
    pub async fn count(&self, descriptor: &ElementDescriptor) -> HarnessResult<usize> {
        Ok(self.driver.find(descriptor).await?.len())
    }

    /// Whether any matching element is currently visible
    pub async fn is_visible(&self, descriptor: &ElementDescriptor) -> HarnessResult<bool> {
        for handle in self.driver.find(descriptor).await? {
            if self.driver.is_visible(&handle).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Text of the first matching element; `None` when nothing matches
    pub async fn text_of(&self, descriptor: &ElementDescriptor) -> HarnessResult<Option<String>> {
        let handles = self.driver.find(descriptor).await?;
        match handles.first() {
            Some(handle) => self.driver.text_content(handle).await,
            None => Ok(None),
        }
    }

    /// Field-level validation message of a single-match form control
    pub async fn validation_message(
        &self,
        descriptor: &ElementDescriptor,
    ) -> HarnessResult<Option<String>> {
        let handle = self.resolve_single(descriptor).await?;
        self.driver.validation_message(&handle).await
    }

    /// Current page URL as the driver reports it
    pub async fn current_url(&self) -> HarnessResult<String> {
        self.driver.current_url().await
    }

    /// Wait until the page URL matches the pattern
    pub async fn wait_for_url(
        &self,
        pattern: &UrlPattern,
        timeout: Option<Duration>,
    ) -> HarnessResult<()> {
        self.driver
            .wait_for_url(pattern, timeout.unwrap_or(DEFAULT_NAVIGATION_TIMEOUT))
            .await
    }
}
