//! Abstract browser driver trait.
//!
//! The harness consumes the browser automation layer through this minimal
//! capability interface: element lookup by semantic descriptor, state
//! queries, fill/click primitives, and wait-for-state/url/load operations.
//! Swapping the underlying engine (CDP, WebDriver, an in-process fake) never
//! touches page-object code.
//!
//! `SimulatedDriver` is the in-process implementation used by the harness's
//! own tests: a scripted model of the FashionHub login flow with a call
//! history for verification.

use crate::descriptor::{AriaRole, ElementDescriptor};
use crate::result::{HarnessError, HarnessResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Element visibility states a wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// Element is attached and visible
    Visible,
    /// Element is absent or not visible
    Hidden,
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visible => f.write_str("visible"),
            Self::Hidden => f.write_str("hidden"),
        }
    }
}

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// The `load` event has fired
    #[default]
    Load,
    /// The `DOMContentLoaded` event has fired
    DomContentLoaded,
    /// No network requests for 500ms
    NetworkIdle,
}

impl LoadState {
    /// Event name as the browser reports it
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Pattern for matching the current page URL
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Exact string equality
    Exact(String),
    /// Substring containment
    Contains(String),
    /// Regular expression match
    Matches(regex::Regex),
}

impl UrlPattern {
    /// Exact-match pattern
    #[must_use]
    pub fn exact(url: impl Into<String>) -> Self {
        Self::Exact(url.into())
    }

    /// Substring pattern
    #[must_use]
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into())
    }

    /// Regular-expression pattern
    pub fn regex(pattern: &str) -> HarnessResult<Self> {
        Ok(Self::Matches(regex::Regex::new(pattern)?))
    }

    /// Check a URL against the pattern
    #[must_use]
    pub fn is_match(&self, url: &str) -> bool {
        match self {
            Self::Exact(expected) => url == expected,
            Self::Contains(fragment) => url.contains(fragment.as_str()),
            Self::Matches(re) => re.is_match(url),
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "url == {s:?}"),
            Self::Contains(s) => write!(f, "url contains {s:?}"),
            Self::Matches(re) => write!(f, "url matches /{}/", re.as_str()),
        }
    }
}

/// Handle to a DOM element at one point in time.
///
/// Handles are snapshots used to address elements across driver calls;
/// descriptors remain the source of truth and are re-evaluated per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned element identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Text content at query time
    pub text_content: Option<String>,
    /// Whether the element was visible at query time
    pub visible: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            visible: true,
        }
    }
}

/// Default budget for element-state waits (5 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default budget for navigation settlement (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Abstract driver trait for browser automation.
///
/// One driver instance backs all page objects of a single test; instances
/// are never shared across concurrently running tests. All operations are
/// blocking from the caller's viewpoint: they resolve when the driver
/// reports completion or a timeout fires.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Resolve a descriptor to the set of currently matching elements
    async fn find(&self, descriptor: &ElementDescriptor) -> HarnessResult<Vec<ElementHandle>>;

    /// Whether the element is currently visible
    async fn is_visible(&self, handle: &ElementHandle) -> HarnessResult<bool>;

    /// Current text content of the element
    async fn text_content(&self, handle: &ElementHandle) -> HarnessResult<Option<String>>;

    /// Field-level constraint-validation message, if the element is a form
    /// control with a pending validation failure
    async fn validation_message(&self, handle: &ElementHandle) -> HarnessResult<Option<String>>;

    /// Set the value of a form control
    async fn fill(&self, handle: &ElementHandle, value: &str) -> HarnessResult<()>;

    /// Click the element
    async fn click(&self, handle: &ElementHandle) -> HarnessResult<()>;

    /// Scroll the element into the viewport
    async fn scroll_into_view(&self, handle: &ElementHandle) -> HarnessResult<()>;

    /// Block until the descriptor reaches the requested visibility state.
    ///
    /// # Errors
    ///
    /// `HarnessError::Timeout` when the budget elapses first.
    async fn wait_for(
        &self,
        descriptor: &ElementDescriptor,
        state: ElementState,
        timeout: Duration,
    ) -> HarnessResult<()>;

    /// Navigate to an absolute URL
    async fn navigate(&self, url: &str) -> HarnessResult<()>;

    /// URL of the current page
    async fn current_url(&self) -> HarnessResult<String>;

    /// Block until the page reaches the given load state
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> HarnessResult<()>;

    /// Block until the current URL matches the pattern
    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> HarnessResult<()>;

    /// Shut the driver down, releasing the underlying browser
    async fn close(&self) -> HarnessResult<()>;
}

// ============================================================================
// Simulated driver
// ============================================================================

/// Message the simulated app reports for an empty required field
pub const FIELD_VALIDATION_MESSAGE: &str = "Please fill out this field.";

/// Alert text the simulated app shows for bad credentials
pub const INVALID_CREDENTIALS_ALERT: &str = "Invalid username or password.";

/// Heading shown on the simulated login screen
pub const LOGIN_HEADING_TEXT: &str = "Login to FashionHub";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Blank,
    Login,
    Home { user: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimField {
    Username,
    Password,
}

#[derive(Debug)]
struct SimState {
    current_url: String,
    screen: Screen,
    username_value: String,
    password_value: String,
    alert_visible: bool,
    validation: Option<SimField>,
    call_history: Vec<String>,
    closed: bool,
}

/// Semantic facts about one simulated element
struct SimElement {
    id: &'static str,
    tag: &'static str,
    role: Option<AriaRole>,
    name: String,
    text: String,
}

/// In-process scripted model of the FashionHub application.
///
/// Implements the login state machine end to end: empty required field ->
/// field validation message and no navigation; wrong password -> alert and
/// the login screen stays; valid credentials -> home screen with the login
/// heading gone and a personalized welcome banner.
///
/// The DOM only mutates between driver calls, so waits re-check once after a
/// short pause instead of polling for the full budget.
#[derive(Debug)]
pub struct SimulatedDriver {
    valid_username: String,
    valid_password: String,
    render_welcome: bool,
    failing_url_fragment: Option<String>,
    state: Mutex<SimState>,
}

impl SimulatedDriver {
    /// Create a driver accepting the given credentials as valid
    #[must_use]
    pub fn new(valid_username: impl Into<String>, valid_password: impl Into<String>) -> Self {
        Self {
            valid_username: valid_username.into(),
            valid_password: valid_password.into(),
            render_welcome: true,
            failing_url_fragment: None,
            state: Mutex::new(SimState {
                current_url: String::new(),
                screen: Screen::Blank,
                username_value: String::new(),
                password_value: String::new(),
                alert_visible: false,
                validation: None,
                call_history: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Suppress the post-login welcome banner.
    ///
    /// Exercises the gap between the weak absence check and the strong
    /// composite login verification.
    #[must_use]
    pub fn without_welcome(mut self) -> Self {
        self.render_welcome = false;
        self
    }

    /// Fail any navigation whose URL contains the given fragment
    #[must_use]
    pub fn failing_navigation(mut self, fragment: impl Into<String>) -> Self {
        self.failing_url_fragment = Some(fragment.into());
        self
    }

    /// Calls made against this driver, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().map(|s| s.call_history.clone()).unwrap_or_default()
    }

    /// Whether a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.history().iter().any(|c| c.starts_with(prefix))
    }

    fn record(state: &mut SimState, call: impl Into<String>) {
        state.call_history.push(call.into());
    }

    fn elements(&self, state: &SimState) -> Vec<SimElement> {
        match &state.screen {
            Screen::Blank => Vec::new(),
            Screen::Login => {
                let mut elements = vec![
                    SimElement {
                        id: "login-heading",
                        tag: "h1",
                        role: Some(AriaRole::Heading),
                        name: LOGIN_HEADING_TEXT.to_string(),
                        text: LOGIN_HEADING_TEXT.to_string(),
                    },
                    SimElement {
                        id: "username-input",
                        tag: "input",
                        role: Some(AriaRole::Textbox),
                        name: "Username".to_string(),
                        text: state.username_value.clone(),
                    },
                    SimElement {
                        id: "password-input",
                        tag: "input",
                        role: Some(AriaRole::Textbox),
                        name: "Password".to_string(),
                        text: state.password_value.clone(),
                    },
                    SimElement {
                        id: "login-button",
                        tag: "button",
                        role: Some(AriaRole::Button),
                        name: "Login".to_string(),
                        text: "Login".to_string(),
                    },
                ];
                if state.alert_visible {
                    elements.push(SimElement {
                        id: "login-alert",
                        tag: "div",
                        role: Some(AriaRole::Alert),
                        name: String::new(),
                        text: INVALID_CREDENTIALS_ALERT.to_string(),
                    });
                }
                elements
            }
            Screen::Home { user } => {
                let mut elements = vec![SimElement {
                    id: "logout-link",
                    tag: "a",
                    role: Some(AriaRole::Link),
                    name: "Logout".to_string(),
                    text: "Logout".to_string(),
                }];
                if self.render_welcome {
                    elements.push(SimElement {
                        id: "welcome-banner",
                        tag: "h2",
                        role: Some(AriaRole::Heading),
                        name: "Welcome".to_string(),
                        text: format!("Welcome {user}"),
                    });
                }
                elements
            }
        }
    }

    fn find_matching(&self, state: &SimState, descriptor: &ElementDescriptor) -> Vec<ElementHandle> {
        self.elements(state)
            .into_iter()
            .filter(|e| descriptor.matches(e.role, &e.name, &e.text))
            .map(|e| ElementHandle {
                id: e.id.to_string(),
                tag_name: e.tag.to_string(),
                text_content: Some(e.text),
                visible: true,
            })
            .collect()
    }

    fn lock(&self) -> HarnessResult<std::sync::MutexGuard<'_, SimState>> {
        self.state.lock().map_err(|_| HarnessError::Driver {
            message: "simulated driver state poisoned".to_string(),
        })
    }

    fn state_satisfied(
        &self,
        state: &SimState,
        descriptor: &ElementDescriptor,
        wanted: ElementState,
    ) -> bool {
        let matched = !self.find_matching(state, descriptor).is_empty();
        match wanted {
            ElementState::Visible => matched,
            ElementState::Hidden => !matched,
        }
    }

    /// Apply the login form submit rules
    fn submit_login(state: &mut SimState, valid: (&str, &str), current_url: &str) {
        state.alert_visible = false;
        if state.username_value.is_empty() {
            state.validation = Some(SimField::Username);
            return;
        }
        if state.password_value.is_empty() {
            state.validation = Some(SimField::Password);
            return;
        }
        state.validation = None;
        if state.username_value == valid.0 && state.password_value == valid.1 {
            let user = state.username_value.clone();
            state.screen = Screen::Home { user };
            state.current_url = current_url.replace("login.html", "home.html");
        } else {
            state.alert_visible = true;
        }
    }
}

#[async_trait]
impl Driver for SimulatedDriver {
    async fn find(&self, descriptor: &ElementDescriptor) -> HarnessResult<Vec<ElementHandle>> {
        let state = self.lock()?;
        Ok(self.find_matching(&state, descriptor))
    }

    async fn is_visible(&self, handle: &ElementHandle) -> HarnessResult<bool> {
        let state = self.lock()?;
        Ok(self.elements(&state).iter().any(|e| e.id == handle.id))
    }

    async fn text_content(&self, handle: &ElementHandle) -> HarnessResult<Option<String>> {
        let state = self.lock()?;
        Ok(self
            .elements(&state)
            .into_iter()
            .find(|e| e.id == handle.id)
            .map(|e| e.text))
    }

    async fn validation_message(&self, handle: &ElementHandle) -> HarnessResult<Option<String>> {
        let state = self.lock()?;
        let failing = match state.validation {
            Some(SimField::Username) => "username-input",
            Some(SimField::Password) => "password-input",
            None => return Ok(None),
        };
        Ok((handle.id == failing).then(|| FIELD_VALIDATION_MESSAGE.to_string()))
    }

    async fn fill(&self, handle: &ElementHandle, value: &str) -> HarnessResult<()> {
        let mut state = self.lock()?;
        Self::record(&mut state, format!("fill:{}:{value}", handle.id));
        match handle.id.as_str() {
            "username-input" => state.username_value = value.to_string(),
            "password-input" => state.password_value = value.to_string(),
            other => {
                return Err(HarnessError::Driver {
                    message: format!("element '{other}' is not fillable"),
                })
            }
        }
        Ok(())
    }

    async fn click(&self, handle: &ElementHandle) -> HarnessResult<()> {
        let mut state = self.lock()?;
        Self::record(&mut state, format!("click:{}", handle.id));
        if handle.id == "login-button" {
            let current_url = state.current_url.clone();
            Self::submit_login(
                &mut state,
                (&self.valid_username, &self.valid_password),
                &current_url,
            );
        }
        Ok(())
    }

    async fn scroll_into_view(&self, handle: &ElementHandle) -> HarnessResult<()> {
        let mut state = self.lock()?;
        Self::record(&mut state, format!("scroll_into_view:{}", handle.id));
        Ok(())
    }

    async fn wait_for(
        &self,
        descriptor: &ElementDescriptor,
        state: ElementState,
        timeout: Duration,
    ) -> HarnessResult<()> {
        if self.state_satisfied(&*self.lock()?, descriptor, state) {
            return Ok(());
        }
        // The simulated DOM only changes between driver calls; one re-check
        // after a short pause stands in for real polling.
        tokio::time::sleep(Duration::from_millis(10)).await;
        if self.state_satisfied(&*self.lock()?, descriptor, state) {
            return Ok(());
        }
        Err(HarnessError::Timeout {
            what: format!("{descriptor} to become {state}"),
            ms: timeout.as_millis() as u64,
        })
    }

    async fn navigate(&self, url: &str) -> HarnessResult<()> {
        let mut state = self.lock()?;
        Self::record(&mut state, format!("navigate:{url}"));
        if let Some(fragment) = &self.failing_url_fragment {
            if url.contains(fragment.as_str()) {
                return Err(HarnessError::Navigation {
                    url: url.to_string(),
                    message: "net::ERR_CONNECTION_REFUSED".to_string(),
                });
            }
        }
        state.current_url = url.to_string();
        state.alert_visible = false;
        state.validation = None;
        state.username_value.clear();
        state.password_value.clear();
        state.screen = if url.ends_with("login.html") {
            Screen::Login
        } else if url.ends_with("home.html") {
            Screen::Home {
                user: self.valid_username.clone(),
            }
        } else {
            Screen::Blank
        };
        Ok(())
    }

    async fn current_url(&self) -> HarnessResult<String> {
        Ok(self.lock()?.current_url.clone())
    }

    async fn wait_for_load_state(&self, state: LoadState, _timeout: Duration) -> HarnessResult<()> {
        let mut guard = self.lock()?;
        Self::record(&mut guard, format!("wait_for_load_state:{state}"));
        // Simulated navigation settles instantly.
        Ok(())
    }

    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> HarnessResult<()> {
        let current = self.lock()?.current_url.clone();
        if pattern.is_match(&current) {
            return Ok(());
        }
        Err(HarnessError::Timeout {
            what: format!("{pattern} (currently {current:?})"),
            ms: timeout.as_millis() as u64,
        })
    }

    async fn close(&self) -> HarnessResult<()> {
        let mut state = self.lock()?;
        Self::record(&mut state, "close");
        state.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_heading() -> ElementDescriptor {
        ElementDescriptor::role(AriaRole::Heading, LOGIN_HEADING_TEXT)
    }

    async fn driver_on_login() -> SimulatedDriver {
        let driver = SimulatedDriver::new("demouser", "fashion123");
        driver
            .navigate("http://localhost:4000/fashionhub/login.html")
            .await
            .unwrap();
        driver
    }

    mod url_pattern_tests {
        use super::*;

        #[test]
        fn test_exact_and_contains() {
            assert!(UrlPattern::exact("http://x/a").is_match("http://x/a"));
            assert!(!UrlPattern::exact("http://x/a").is_match("http://x/a/b"));
            assert!(UrlPattern::contains("home.html").is_match("http://x/home.html"));
        }

        #[test]
        fn test_regex() {
            let pattern = UrlPattern::regex(r"fashionhub/(home|account)\.html$").unwrap();
            assert!(pattern.is_match("http://x/fashionhub/home.html"));
            assert!(!pattern.is_match("http://x/fashionhub/login.html"));
        }

        #[test]
        fn test_invalid_regex_is_an_error() {
            assert!(matches!(
                UrlPattern::regex("("),
                Err(HarnessError::Pattern(_))
            ));
        }
    }

    mod navigation_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_renders_login_screen() {
            let driver = driver_on_login().await;
            let matches = driver.find(&login_heading()).await.unwrap();
            assert_eq!(matches.len(), 1);
            assert!(driver.was_called("navigate:"));
        }

        #[tokio::test]
        async fn test_navigation_failure_is_raised() {
            let driver = SimulatedDriver::new("u", "p").failing_navigation("localhost");
            let err = driver
                .navigate("http://localhost:4000/fashionhub/login.html")
                .await
                .unwrap_err();
            assert!(matches!(err, HarnessError::Navigation { .. }));
        }

        #[tokio::test]
        async fn test_current_url_tracks_navigation() {
            let driver = driver_on_login().await;
            let url = driver.current_url().await.unwrap();
            assert_eq!(url, "http://localhost:4000/fashionhub/login.html");
        }
    }

    mod login_flow_tests {
        use super::*;

        async fn fill_and_submit(driver: &SimulatedDriver, username: &str, password: &str) {
            let textbox = |name: &str| ElementDescriptor::role(AriaRole::Textbox, name);
            if !username.is_empty() {
                let handle = &driver.find(&textbox("Username")).await.unwrap()[0];
                driver.fill(handle, username).await.unwrap();
            }
            if !password.is_empty() {
                let handle = &driver.find(&textbox("Password")).await.unwrap()[0];
                driver.fill(handle, password).await.unwrap();
            }
            let button = &driver
                .find(&ElementDescriptor::role(AriaRole::Button, "Login"))
                .await
                .unwrap()[0];
            driver.click(button).await.unwrap();
        }

        #[tokio::test]
        async fn test_valid_credentials_reach_home() {
            let driver = driver_on_login().await;
            fill_and_submit(&driver, "demouser", "fashion123").await;

            assert_eq!(driver.find(&login_heading()).await.unwrap().len(), 0);
            let welcome = driver
                .find(&ElementDescriptor::text("Welcome"))
                .await
                .unwrap();
            assert_eq!(welcome.len(), 1);
            assert_eq!(
                welcome[0].text_content.as_deref(),
                Some("Welcome demouser")
            );
            assert!(driver.current_url().await.unwrap().ends_with("home.html"));
        }

        #[tokio::test]
        async fn test_wrong_password_shows_alert() {
            let driver = driver_on_login().await;
            fill_and_submit(&driver, "demouser", "wrongpassword").await;

            assert_eq!(driver.find(&login_heading()).await.unwrap().len(), 1);
            let alert = driver
                .find(&ElementDescriptor::exact_text(INVALID_CREDENTIALS_ALERT))
                .await
                .unwrap();
            assert_eq!(alert.len(), 1);
        }

        #[tokio::test]
        async fn test_empty_username_sets_field_validation() {
            let driver = driver_on_login().await;
            fill_and_submit(&driver, "", "fashion123").await;

            // Still on the login screen, no alert, validation on the field.
            assert_eq!(driver.find(&login_heading()).await.unwrap().len(), 1);
            let username = &driver
                .find(&ElementDescriptor::role(AriaRole::Textbox, "Username"))
                .await
                .unwrap()[0];
            assert_eq!(
                driver.validation_message(username).await.unwrap().as_deref(),
                Some(FIELD_VALIDATION_MESSAGE)
            );
        }

        #[tokio::test]
        async fn test_without_welcome_suppresses_banner() {
            let driver = SimulatedDriver::new("demouser", "fashion123").without_welcome();
            driver
                .navigate("http://localhost:4000/fashionhub/login.html")
                .await
                .unwrap();
            fill_and_submit(&driver, "demouser", "fashion123").await;

            assert_eq!(driver.find(&login_heading()).await.unwrap().len(), 0);
            let welcome = driver
                .find(&ElementDescriptor::text("Welcome"))
                .await
                .unwrap();
            assert!(welcome.is_empty());
        }
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_visible_succeeds_immediately() {
            let driver = driver_on_login().await;
            driver
                .wait_for(
                    &login_heading(),
                    ElementState::Visible,
                    Duration::from_millis(50),
                )
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_wait_succeeds_on_recheck_after_dom_change() {
            let driver = std::sync::Arc::new(SimulatedDriver::new("demouser", "fashion123"));
            let background = driver.clone();
            let navigation = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(3)).await;
                background
                    .navigate("http://localhost:4000/fashionhub/login.html")
                    .await
                    .unwrap();
            });

            // Screen is blank at the first check; the re-check sees the
            // login screen rendered by the concurrent navigation.
            driver
                .wait_for(
                    &login_heading(),
                    ElementState::Visible,
                    Duration::from_millis(100),
                )
                .await
                .unwrap();
            navigation.await.unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_hidden_times_out_while_visible() {
            let driver = driver_on_login().await;
            let err = driver
                .wait_for(
                    &login_heading(),
                    ElementState::Hidden,
                    Duration::from_millis(50),
                )
                .await
                .unwrap_err();
            assert!(err.is_timeout());
        }

        #[tokio::test]
        async fn test_wait_for_url_mismatch_times_out() {
            let driver = driver_on_login().await;
            let err = driver
                .wait_for_url(
                    &UrlPattern::contains("home.html"),
                    Duration::from_millis(50),
                )
                .await
                .unwrap_err();
            assert!(err.is_timeout());
        }
    }

    mod close_tests {
        use super::*;

        #[tokio::test]
        async fn test_close_is_recorded() {
            let driver = driver_on_login().await;
            driver.close().await.unwrap();
            assert!(driver.was_called("close"));
        }
    }
}
