//! Environment resolution.
//!
//! One data-driven policy table maps each named deployment environment
//! (test, stage, prod) to its base URL, credentials, parallelism, retry,
//! capture, and browser-matrix defaults. `resolve` merges that table with
//! process environment variables and CLI overrides into an immutable
//! [`EnvConfig`], constructed once per process.
//!
//! Resolution is total: an unrecognized environment name degrades to the
//! test defaults with a warning, never a hard failure, because CI pipelines
//! must not die on a misconfigured variable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Named deployment environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development and CI (default)
    #[default]
    Test,
    /// Pre-production staging
    Stage,
    /// Live production
    Prod,
}

impl Environment {
    /// Parse an environment selector; `None` for unrecognized names
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "test" | "local" => Some(Self::Test),
            "stage" | "staging" => Some(Self::Stage),
            "prod" | "production" => Some(Self::Prod),
            _ => None,
        }
    }

    /// Canonical selector string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Stage => "stage",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser engines a test run can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEngine {
    /// Chromium-based browsers
    Chromium,
    /// Firefox / Gecko
    Firefox,
    /// Safari / WebKit
    Webkit,
}

/// Trace, screenshot, and video capture verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapturePolicy {
    /// Never capture
    Off,
    /// Always capture
    On,
    /// Capture starting with the first retry of a failed test
    OnFirstRetry,
    /// Capture everywhere, keep only on failure
    RetainOnFailure,
    /// Capture only for failed tests
    OnlyOnFailure,
}

/// Worker-count policy consumed by the external runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCount {
    /// Let the runner pick based on host CPUs
    Auto,
    /// Fixed number of workers
    Fixed(u32),
}

/// Report writers the external runner should attach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reporter {
    /// Human-readable HTML report
    Html {
        /// Output directory
        output_dir: String,
    },
    /// Machine-readable JUnit XML
    Junit {
        /// Output file path
        output_file: String,
    },
}

/// Username/password pair for the application under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Copy of this pair with a different password, for negative paths
    #[must_use]
    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self {
            username: self.username.clone(),
            password: password.into(),
        }
    }
}

/// Fully resolved, immutable configuration for one process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Which named environment resolved
    pub environment: Environment,
    /// Absolute base URL, always ending in a path separator
    pub base_url: Url,
    /// Default credentials for this environment
    pub credentials: Credentials,
    /// Whether tests may run fully parallel
    pub parallel: bool,
    /// Retry count for failed tests
    pub retries: u32,
    /// Worker-count policy
    pub workers: WorkerCount,
    /// Browser matrix, in execution order
    pub browsers: Vec<BrowserEngine>,
    /// Trace capture verbosity
    pub trace: CapturePolicy,
    /// Screenshot capture verbosity
    pub screenshot: CapturePolicy,
    /// Video capture verbosity
    pub video: CapturePolicy,
    /// Report writers to attach
    pub reporters: Vec<Reporter>,
    /// Whether browsers run headless
    pub headless: bool,
    /// Extra HTTP headers sent with every request
    pub extra_headers: Vec<(String, String)>,
    /// Whether the harness should manage a local web server
    pub manage_web_server: bool,
}

/// Non-fatal problem encountered during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Human-readable description
    pub message: String,
}

/// Outcome of [`resolve`]: a config plus any warnings emitted
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved configuration
    pub config: EnvConfig,
    /// Warnings emitted while resolving (at most one per cause)
    pub warnings: Vec<ConfigWarning>,
}

/// Explicit command-line overrides; all fields optional
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Environment selector (`--env`)
    pub environment: Option<String>,
    /// Base URL (`--base-url`)
    pub base_url: Option<String>,
    /// Retry count (`--retries`)
    pub retries: Option<u32>,
    /// Worker count (`--workers`)
    pub workers: Option<u32>,
    /// Run browsers headed instead of headless (`--headed` inverts this)
    pub headless: Option<bool>,
}

/// Built-in per-environment defaults. One row per environment; resolution
/// never branches on the environment anywhere else.
struct EnvPolicy {
    base_url: &'static str,
    username: &'static str,
    password: &'static str,
    username_var: &'static str,
    password_var: &'static str,
    parallel: bool,
    retries: u32,
    ci_retries: u32,
    workers: WorkerCount,
    ci_workers: WorkerCount,
    browsers: &'static [BrowserEngine],
    trace: CapturePolicy,
    screenshot: CapturePolicy,
    video: CapturePolicy,
}

const fn policy(environment: Environment) -> EnvPolicy {
    use BrowserEngine::{Chromium, Firefox, Webkit};
    match environment {
        Environment::Test => EnvPolicy {
            base_url: "http://localhost:4000/fashionhub/",
            username: "demouser",
            password: "fashion123",
            username_var: "TEST_USERNAME",
            password_var: "TEST_PASSWORD",
            parallel: true,
            retries: 0,
            ci_retries: 2,
            workers: WorkerCount::Auto,
            ci_workers: WorkerCount::Fixed(1),
            browsers: &[Chromium, Firefox, Webkit],
            trace: CapturePolicy::OnFirstRetry,
            screenshot: CapturePolicy::OnlyOnFailure,
            video: CapturePolicy::Off,
        },
        Environment::Stage => EnvPolicy {
            base_url: "https://staging-env/fashionhub/",
            username: "stageuser",
            password: "stagepass123",
            username_var: "STAGE_USERNAME",
            password_var: "STAGE_PASSWORD",
            parallel: true,
            retries: 1,
            ci_retries: 1,
            workers: WorkerCount::Fixed(2),
            ci_workers: WorkerCount::Fixed(1),
            browsers: &[Chromium, Firefox],
            trace: CapturePolicy::RetainOnFailure,
            screenshot: CapturePolicy::OnlyOnFailure,
            video: CapturePolicy::Off,
        },
        // Production narrows to one engine and serializes execution to
        // avoid load on a live system.
        Environment::Prod => EnvPolicy {
            base_url: "https://pocketaces2.github.io/fashionhub/",
            username: "demouser1",
            password: "fashion123",
            username_var: "PROD_USERNAME",
            password_var: "PROD_PASSWORD",
            parallel: false,
            retries: 2,
            ci_retries: 2,
            workers: WorkerCount::Fixed(1),
            ci_workers: WorkerCount::Fixed(1),
            browsers: &[Chromium],
            trace: CapturePolicy::RetainOnFailure,
            screenshot: CapturePolicy::On,
            video: CapturePolicy::RetainOnFailure,
        },
    }
}

/// Environment variable selecting the named environment
pub const ENV_SELECTOR_VAR: &str = "TEST_ENV";

/// Environment variable overriding the base URL
pub const BASE_URL_VAR: &str = "BASE_URL";

fn is_truthy(value: Option<&String>) -> bool {
    matches!(value.map(String::as_str), Some("true" | "1"))
}

/// Normalize a base URL so relative joins preserve the final path segment
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Capture the process environment as a plain map
#[must_use]
pub fn capture_process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Resolve the effective configuration.
///
/// Precedence per field: CLI override, then environment variable, then the
/// named environment's built-in default, then the global fallback (the test
/// environment). Total: never fails, warnings are collected instead.
#[must_use]
pub fn resolve(
    process_env: &HashMap<String, String>,
    overrides: &CliOverrides,
) -> Resolution {
    let mut warnings = Vec::new();

    let selector = overrides
        .environment
        .as_deref()
        .or(process_env.get(ENV_SELECTOR_VAR).map(String::as_str));

    let environment = match selector {
        None => Environment::default(),
        Some(name) => Environment::parse(name).unwrap_or_else(|| {
            let warning = ConfigWarning {
                message: format!(
                    "unrecognized environment {name:?}; valid values: test, stage, prod; \
                     defaulting to \"test\""
                ),
            };
            tracing::warn!(environment = name, "{}", warning.message);
            warnings.push(warning);
            Environment::default()
        }),
    };

    let table = policy(environment);
    let is_ci = is_truthy(process_env.get("CI")) || is_truthy(process_env.get("DOCKER"));

    let base_url = overrides
        .base_url
        .as_deref()
        .or(process_env.get(BASE_URL_VAR).map(String::as_str))
        .and_then(|candidate| match Url::parse(candidate) {
            Ok(url) => Some(url),
            Err(e) => {
                let warning = ConfigWarning {
                    message: format!(
                        "invalid base URL override {candidate:?} ({e}); \
                         using the {environment} default"
                    ),
                };
                tracing::warn!("{}", warning.message);
                warnings.push(warning);
                None
            }
        })
        .unwrap_or_else(|| {
            // Built-in defaults are known-valid absolute URLs.
            Url::parse(table.base_url).unwrap()
        });
    let base_url = normalize_base_url(base_url);

    let credentials = Credentials::new(
        process_env
            .get(table.username_var)
            .cloned()
            .unwrap_or_else(|| table.username.to_string()),
        process_env
            .get(table.password_var)
            .cloned()
            .unwrap_or_else(|| table.password.to_string()),
    );

    let retries = overrides
        .retries
        .unwrap_or(if is_ci { table.ci_retries } else { table.retries });
    let workers = overrides
        .workers
        .map(WorkerCount::Fixed)
        .unwrap_or(if is_ci { table.ci_workers } else { table.workers });

    let extra_headers = vec![
        ("X-Test-User".to_string(), credentials.username.clone()),
        ("X-Test-Pass".to_string(), credentials.password.clone()),
    ];

    let config = EnvConfig {
        environment,
        base_url,
        credentials,
        parallel: table.parallel,
        retries,
        workers,
        browsers: table.browsers.to_vec(),
        trace: table.trace,
        screenshot: table.screenshot,
        video: table.video,
        // Headed runs are a local-debugging opt-in.
        headless: overrides.headless.unwrap_or(true),
        reporters: vec![
            Reporter::Html {
                output_dir: "pasarela-report".to_string(),
            },
            Reporter::Junit {
                output_file: "test-results/junit-results.xml".to_string(),
            },
        ],
        extra_headers,
        // A locally managed web server only makes sense for the local
        // environment outside containers.
        manage_web_server: environment == Environment::Test && !is_ci,
    };

    tracing::debug!(
        environment = %config.environment,
        base_url = %config.base_url,
        retries = config.retries,
        "configuration resolved"
    );

    Resolution { config, warnings }
}
