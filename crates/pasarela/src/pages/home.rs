//! Post-authentication home screen page object.

use crate::descriptor::{AriaRole, ElementDescriptor};
use crate::page::PageActions;
use crate::result::{HarnessError, HarnessResult};

use super::login::LOGIN_HEADING;

/// Page object for the screen shown after a successful login.
///
/// Authentication is inferred two ways: the weak signal is the
/// *disappearance* of the login heading (the screen does not always render a
/// dedicated "logged in" marker), the strong signal is the presence of the
/// personalized welcome element. [`HomePage::verify_user_logged_in`] requires
/// both and is the recommended check.
#[derive(Debug, Clone)]
pub struct HomePage {
    actions: PageActions,
    login_heading: ElementDescriptor,
    welcome: ElementDescriptor,
}

impl HomePage {
    /// Create the page object over a shared driver
    #[must_use]
    pub fn new(actions: PageActions) -> Self {
        Self {
            actions,
            login_heading: ElementDescriptor::role(AriaRole::Heading, LOGIN_HEADING),
            welcome: ElementDescriptor::text("Welcome"),
        }
    }

    /// Shared interaction helpers
    #[must_use]
    pub fn actions(&self) -> &PageActions {
        &self.actions
    }

    /// Weak authentication signal: true iff the login heading is absent.
    ///
    /// An absence check can false-positive when the screen fails to render
    /// for unrelated reasons; prefer [`Self::verify_user_logged_in`] where
    /// the welcome element is available.
    pub async fn is_logged_in(&self) -> HarnessResult<bool> {
        Ok(self.login_heading_count().await? == 0)
    }

    /// Number of login headings currently on the page.
    ///
    /// Exposed separately so tests can distinguish "gone" from
    /// "unexpectedly duplicated".
    pub async fn login_heading_count(&self) -> HarnessResult<usize> {
        self.actions.count(&self.login_heading).await
    }

    /// Strong authentication signal: the personalized welcome element
    pub async fn has_welcome_message(&self) -> HarnessResult<bool> {
        self.actions.is_visible(&self.welcome).await
    }

    /// Composite authentication assertion.
    ///
    /// Requires both the absence of the login heading and the presence of
    /// the welcome element; the error names whichever half failed so the
    /// caller does not have to re-derive state.
    pub async fn verify_user_logged_in(&self) -> HarnessResult<()> {
        let heading_count = self.login_heading_count().await?;
        if heading_count > 0 {
            return Err(HarnessError::assertion(format!(
                "login heading is still present (count {heading_count}); \
                 user does not appear to be logged in"
            )));
        }
        if !self.has_welcome_message().await? {
            return Err(HarnessError::assertion(
                "login heading is gone but no welcome message is visible; \
                 cannot confirm the user is logged in",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SimulatedDriver;
    use crate::pages::LoginPage;
    use std::sync::Arc;
    use url::Url;

    fn pages(driver: SimulatedDriver) -> (LoginPage, HomePage) {
        let actions = PageActions::new(
            Arc::new(driver),
            Url::parse("http://localhost:4000/fashionhub/").unwrap(),
        );
        (LoginPage::new(actions.clone()), HomePage::new(actions))
    }

    #[tokio::test]
    async fn test_not_logged_in_on_login_screen() {
        let (login, home) = pages(SimulatedDriver::new("demouser", "fashion123"));
        login.open().await.unwrap();

        assert!(!home.is_logged_in().await.unwrap());
        assert_eq!(home.login_heading_count().await.unwrap(), 1);
        assert!(!home.has_welcome_message().await.unwrap());
    }

    #[tokio::test]
    async fn test_logged_in_after_valid_login() {
        let (login, home) = pages(SimulatedDriver::new("demouser", "fashion123"));
        login.open().await.unwrap();
        login
            .submit_credentials("demouser", "fashion123")
            .await
            .unwrap();

        assert!(home.is_logged_in().await.unwrap());
        assert_eq!(home.login_heading_count().await.unwrap(), 0);
        assert!(home.has_welcome_message().await.unwrap());
        home.verify_user_logged_in().await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_names_heading_half() {
        let (login, home) = pages(SimulatedDriver::new("demouser", "fashion123"));
        login.open().await.unwrap();

        let err = home.verify_user_logged_in().await.unwrap_err();
        assert!(err.to_string().contains("login heading is still present"));
    }

    #[tokio::test]
    async fn test_verify_names_welcome_half() {
        // Heading already gone but no welcome rendered: the weak check
        // passes while the composite one must not.
        let (login, home) = pages(
            SimulatedDriver::new("demouser", "fashion123").without_welcome(),
        );
        login.open().await.unwrap();
        login
            .submit_credentials("demouser", "fashion123")
            .await
            .unwrap();

        assert!(home.is_logged_in().await.unwrap());
        let err = home.verify_user_logged_in().await.unwrap_err();
        assert!(err.to_string().contains("no welcome message"));
    }
}
