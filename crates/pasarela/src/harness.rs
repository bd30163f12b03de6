//! Standard fixture wiring for FashionHub test scenarios.
//!
//! [`standard_registry`] assembles the fixture graph every login-flow test
//! shares: a driver, environment credentials, the page objects over that
//! driver, and the two canonical login actions. Tests ask for the topmost
//! fixture they need and the registry pulls in the rest.

use crate::config::{Credentials, EnvConfig};
use crate::driver::Driver;
use crate::fixture::{FixtureRegistry, FixtureSet, FixtureValue};
use crate::page::PageActions;
use crate::pages::{HomePage, LoginPage};
use crate::result::{HarnessError, HarnessResult};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;

/// Fixture name: the shared browser driver
pub const DRIVER_FIXTURE: &str = "driver";
/// Fixture name: environment credentials
pub const CREDENTIALS_FIXTURE: &str = "credentials";
/// Fixture name: the login page object
pub const LOGIN_PAGE_FIXTURE: &str = "login_page";
/// Fixture name: the home page object
pub const HOME_PAGE_FIXTURE: &str = "home_page";
/// Fixture name: the valid-login action
pub const VALID_LOGIN_FIXTURE: &str = "valid_login";
/// Fixture name: the invalid-login action
pub const INVALID_LOGIN_FIXTURE: &str = "invalid_login";

/// Deliberately-wrong password used by the invalid-login action
pub const WRONG_PASSWORD: &str = "wrongpassword";

/// Driver factory used by [`standard_registry`].
///
/// Kept as a factory rather than a value so the driver is only started when
/// a test actually requests a fixture that needs it.
pub type DriverFactory =
    Arc<dyn Fn() -> BoxFuture<'static, HarnessResult<Arc<dyn Driver>>> + Send + Sync>;

/// Newtype wrapper so the driver trait object can live in a fixture set
pub struct SharedDriver(pub Arc<dyn Driver>);

impl std::fmt::Debug for SharedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedDriver")
    }
}

/// The happy-path login action: open the login screen, submit the
/// environment credentials, and assert the user landed logged in.
#[derive(Debug, Clone)]
pub struct ValidLogin {
    login_page: LoginPage,
    home_page: HomePage,
    credentials: Credentials,
}

impl ValidLogin {
    /// Build the action from its collaborators
    #[must_use]
    pub fn new(login_page: LoginPage, home_page: HomePage, credentials: Credentials) -> Self {
        Self {
            login_page,
            home_page,
            credentials,
        }
    }

    /// Run the flow end to end.
    ///
    /// # Errors
    ///
    /// Any navigation or interaction failure, or `Assertion` when the
    /// post-login state cannot be confirmed.
    pub async fn run(&self) -> HarnessResult<()> {
        self.login_page.open().await?;
        self.login_page
            .submit_credentials(&self.credentials.username, &self.credentials.password)
            .await?;
        self.home_page.verify_user_logged_in().await
    }
}

/// The rejection-path login action: submit the right username with a wrong
/// password and assert the screen stays on login with the exact alert.
#[derive(Debug, Clone)]
pub struct InvalidLogin {
    login_page: LoginPage,
    credentials: Credentials,
}

impl InvalidLogin {
    /// Build the action from its collaborators
    #[must_use]
    pub fn new(login_page: LoginPage, credentials: Credentials) -> Self {
        Self {
            login_page,
            credentials,
        }
    }

    /// Run the flow end to end.
    ///
    /// # Errors
    ///
    /// Any interaction failure, or `Assertion` when the screen navigated
    /// away or the alert text differs from the expected one.
    pub async fn run(&self) -> HarnessResult<()> {
        self.login_page.open().await?;
        self.login_page
            .submit_credentials(&self.credentials.username, WRONG_PASSWORD)
            .await?;
        self.login_page.verify_login_failed().await?;
        match self.login_page.alert_text().await? {
            Some(text) if text == crate::pages::INVALID_CREDENTIALS_ALERT => Ok(()),
            Some(text) => Err(HarnessError::assertion(format!(
                "alert text mismatch: expected {:?}, got {text:?}",
                crate::pages::INVALID_CREDENTIALS_ALERT
            ))),
            None => Err(HarnessError::assertion(
                "login was rejected but no alert is shown",
            )),
        }
    }
}

fn value<T: Send + Sync + 'static>(v: T) -> FixtureValue {
    Arc::new(v) as FixtureValue
}

fn page_actions(set: &FixtureSet, config: &EnvConfig) -> HarnessResult<PageActions> {
    let driver = set.get::<SharedDriver>(DRIVER_FIXTURE)?;
    Ok(PageActions::new(driver.0.clone(), config.base_url.clone()))
}

/// Assemble the standard fixture graph for one resolved environment.
///
/// The driver fixture owns driver shutdown: its teardown calls
/// [`Driver::close`], so every test that builds this graph releases the
/// browser in reverse fixture order regardless of test outcome.
#[must_use]
pub fn standard_registry(config: EnvConfig, make_driver: DriverFactory) -> FixtureRegistry {
    let mut registry = FixtureRegistry::new();
    let config = Arc::new(config);

    registry.register_with_teardown(
        DRIVER_FIXTURE,
        &[],
        move |_: &FixtureSet| {
            let make_driver = make_driver.clone();
            async move {
                let driver = make_driver().await?;
                Ok(value(SharedDriver(driver)))
            }
            .boxed()
        },
        |v| {
            async move {
                let driver = v
                    .downcast::<SharedDriver>()
                    .map_err(|_| HarnessError::Fixture {
                        name: DRIVER_FIXTURE.to_string(),
                        message: "driver fixture holds an unexpected type".to_string(),
                    })?;
                driver.0.close().await
            }
            .boxed()
        },
    );

    let creds = config.credentials.clone();
    registry.register(CREDENTIALS_FIXTURE, &[], move |_: &FixtureSet| {
        let creds = creds.clone();
        async move { Ok(value(creds)) }.boxed()
    });

    let cfg = config.clone();
    registry.register(LOGIN_PAGE_FIXTURE, &[DRIVER_FIXTURE], move |set: &FixtureSet| {
        let cfg = cfg.clone();
        async move { Ok(value(LoginPage::new(page_actions(set, &cfg)?))) }.boxed()
    });

    let cfg = config.clone();
    registry.register(HOME_PAGE_FIXTURE, &[DRIVER_FIXTURE], move |set: &FixtureSet| {
        let cfg = cfg.clone();
        async move { Ok(value(HomePage::new(page_actions(set, &cfg)?))) }.boxed()
    });

    registry.register(
        VALID_LOGIN_FIXTURE,
        &[LOGIN_PAGE_FIXTURE, HOME_PAGE_FIXTURE, CREDENTIALS_FIXTURE],
        |set: &FixtureSet| {
            async move {
                let login = set.get::<LoginPage>(LOGIN_PAGE_FIXTURE)?;
                let home = set.get::<HomePage>(HOME_PAGE_FIXTURE)?;
                let creds = set.get::<Credentials>(CREDENTIALS_FIXTURE)?;
                Ok(value(ValidLogin::new(
                    (*login).clone(),
                    (*home).clone(),
                    (*creds).clone(),
                )))
            }
            .boxed()
        },
    );

    registry.register(
        INVALID_LOGIN_FIXTURE,
        &[LOGIN_PAGE_FIXTURE, CREDENTIALS_FIXTURE],
        |set: &FixtureSet| {
            async move {
                let login = set.get::<LoginPage>(LOGIN_PAGE_FIXTURE)?;
                let creds = set.get::<Credentials>(CREDENTIALS_FIXTURE)?;
                Ok(value(InvalidLogin::new((*login).clone(), (*creds).clone())))
            }
            .boxed()
        },
    );

    registry
}
