//! Login screen page object.

use crate::descriptor::{AriaRole, ElementDescriptor};
use crate::page::PageActions;
use crate::result::{HarnessError, HarnessResult};

/// Relative path of the login screen
pub const LOGIN_PATH: &str = "login.html";

/// Accessible name of the login heading
pub const LOGIN_HEADING: &str = "Login to FashionHub";

/// Exact text of the bad-credentials alert
pub const INVALID_CREDENTIALS_ALERT: &str = "Invalid username or password.";

/// Form fields of the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// The username textbox
    Username,
    /// The password textbox
    Password,
}

/// Page object for the FashionHub login screen.
///
/// State machine over the screen: unsubmitted, submitted-success (navigated
/// away), submitted-failure (alert or field validation shown).
#[derive(Debug, Clone)]
pub struct LoginPage {
    actions: PageActions,
    username: ElementDescriptor,
    password: ElementDescriptor,
    login_button: ElementDescriptor,
    heading: ElementDescriptor,
    alert: ElementDescriptor,
}

impl LoginPage {
    /// Create the page object over a shared driver
    #[must_use]
    pub fn new(actions: PageActions) -> Self {
        Self {
            actions,
            username: ElementDescriptor::role(AriaRole::Textbox, "Username"),
            password: ElementDescriptor::role(AriaRole::Textbox, "Password"),
            login_button: ElementDescriptor::role(AriaRole::Button, "Login"),
            heading: ElementDescriptor::role(AriaRole::Heading, LOGIN_HEADING),
            alert: ElementDescriptor::exact_text(INVALID_CREDENTIALS_ALERT),
        }
    }

    /// Shared interaction helpers, for callers composing extra steps
    #[must_use]
    pub fn actions(&self) -> &PageActions {
        &self.actions
    }

    /// Navigate to the login screen and assert it rendered.
    ///
    /// The heading check is the canary that base-URL resolution is correct:
    /// it fails fast with a diagnostic naming the URL instead of letting a
    /// later step time out obscurely.
    pub async fn open(&self) -> HarnessResult<()> {
        self.actions.navigate(LOGIN_PATH).await?;
        if let Err(e) = self.actions.wait_for_visible(&self.heading, None).await {
            let url = self.actions.current_url().await.unwrap_or_default();
            return Err(HarnessError::assertion(format!(
                "login screen never rendered at {url:?} \
                 (heading {LOGIN_HEADING:?} not visible: {e}); check base URL resolution"
            )));
        }
        Ok(())
    }

    /// Fill both credential fields without submitting.
    ///
    /// Waits for both fields to be visible first.
    pub async fn fill_credentials(&self, username: &str, password: &str) -> HarnessResult<()> {
        self.actions.wait_for_visible(&self.username, None).await?;
        self.actions.wait_for_visible(&self.password, None).await?;
        self.actions.fill(&self.username, username).await?;
        self.actions.fill(&self.password, password).await
    }

    /// Fill a single field, leaving the other untouched
    pub async fn fill_field(&self, field: LoginField, value: &str) -> HarnessResult<()> {
        self.actions.fill(self.field_descriptor(field), value).await
    }

    /// Click the login control and await navigation settlement
    pub async fn submit(&self) -> HarnessResult<()> {
        self.actions.click(&self.login_button, true).await
    }

    /// The canonical "attempt login" operation: fill then submit
    pub async fn submit_credentials(&self, username: &str, password: &str) -> HarnessResult<()> {
        self.fill_credentials(username, password).await?;
        self.submit().await
    }

    /// Whether the bad-credentials alert is present
    pub async fn has_alert(&self) -> HarnessResult<bool> {
        Ok(self.actions.count(&self.alert).await? > 0)
    }

    /// Text of the alert; `None` when absent.
    ///
    /// Absence is a valid outcome to assert against, so this never raises
    /// for a missing alert.
    pub async fn alert_text(&self) -> HarnessResult<Option<String>> {
        self.actions.text_of(&self.alert).await
    }

    /// Field-level constraint-validation message, if any
    pub async fn validation_message(&self, field: LoginField) -> HarnessResult<Option<String>> {
        self.actions
            .validation_message(self.field_descriptor(field))
            .await
    }

    /// Assert the screen is still the login screen.
    ///
    /// Raises a descriptive assertion error rather than returning a boolean:
    /// a violated postcondition here is a broken contract the caller must
    /// treat as a hard test failure, not a value to branch on.
    pub async fn verify_login_failed(&self) -> HarnessResult<()> {
        if self.actions.is_visible(&self.heading).await? {
            return Ok(());
        }
        let url = self.actions.current_url().await.unwrap_or_default();
        Err(HarnessError::assertion(format!(
            "expected to remain on the login screen, but the heading \
             {LOGIN_HEADING:?} is not visible (current URL: {url:?})"
        )))
    }

    const fn field_descriptor(&self, field: LoginField) -> &ElementDescriptor {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SimulatedDriver;
    use std::sync::Arc;
    use url::Url;

    fn page_over(driver: SimulatedDriver) -> LoginPage {
        let actions = PageActions::new(
            Arc::new(driver),
            Url::parse("http://localhost:4000/fashionhub/").unwrap(),
        );
        LoginPage::new(actions)
    }

    fn login_page() -> LoginPage {
        page_over(SimulatedDriver::new("demouser", "fashion123"))
    }

    mod open_tests {
        use super::*;

        #[tokio::test]
        async fn test_open_renders_login_screen() {
            let page = login_page();
            page.open().await.unwrap();
            assert!(page
                .actions()
                .current_url()
                .await
                .unwrap()
                .ends_with("login.html"));
        }

        #[tokio::test]
        async fn test_open_fails_fast_when_unreachable() {
            let page =
                page_over(SimulatedDriver::new("u", "p").failing_navigation("fashionhub"));
            let err = page.open().await.unwrap_err();
            assert!(matches!(err, HarnessError::Navigation { .. }));
        }
    }

    mod submit_tests {
        use super::*;

        #[tokio::test]
        async fn test_valid_login_leaves_login_screen() {
            let page = login_page();
            page.open().await.unwrap();
            page.submit_credentials("demouser", "fashion123")
                .await
                .unwrap();

            assert!(!page.has_alert().await.unwrap());
            assert!(page.verify_login_failed().await.is_err());
        }

        #[tokio::test]
        async fn test_wrong_password_shows_exact_alert() {
            let page = login_page();
            page.open().await.unwrap();
            page.submit_credentials("demouser", "wrongpassword")
                .await
                .unwrap();

            assert!(page.has_alert().await.unwrap());
            assert_eq!(
                page.alert_text().await.unwrap().as_deref(),
                Some(INVALID_CREDENTIALS_ALERT)
            );
            page.verify_login_failed().await.unwrap();
        }

        #[tokio::test]
        async fn test_alert_text_is_none_before_submit() {
            let page = login_page();
            page.open().await.unwrap();
            assert_eq!(page.alert_text().await.unwrap(), None);
        }
    }

    mod validation_tests {
        use super::*;

        #[tokio::test]
        async fn test_empty_username_surfaces_field_validation() {
            let page = login_page();
            page.open().await.unwrap();
            page.fill_field(LoginField::Password, "fashion123")
                .await
                .unwrap();
            page.submit().await.unwrap();

            assert_eq!(
                page.validation_message(LoginField::Username)
                    .await
                    .unwrap()
                    .as_deref(),
                Some("Please fill out this field.")
            );
            // Still on the login screen.
            page.verify_login_failed().await.unwrap();
        }

        #[tokio::test]
        async fn test_empty_password_surfaces_field_validation() {
            let page = login_page();
            page.open().await.unwrap();
            page.fill_field(LoginField::Username, "demouser")
                .await
                .unwrap();
            page.submit().await.unwrap();

            assert_eq!(
                page.validation_message(LoginField::Password)
                    .await
                    .unwrap()
                    .as_deref(),
                Some("Please fill out this field.")
            );
        }
    }

    mod verify_tests {
        use super::*;

        #[tokio::test]
        async fn test_verify_login_failed_error_names_condition() {
            let page = login_page();
            page.open().await.unwrap();
            page.submit_credentials("demouser", "fashion123")
                .await
                .unwrap();

            let err = page.verify_login_failed().await.unwrap_err();
            assert!(matches!(err, HarnessError::Assertion { .. }));
            assert!(err.to_string().contains("login screen"));
        }
    }
}
