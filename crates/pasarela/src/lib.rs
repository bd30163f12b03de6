//! Pasarela: End-to-End UI Test Harness for FashionHub
//!
//! Pasarela (Spanish: "runway") drives the FashionHub web application
//! through a browser-agnostic driver trait, page objects built by
//! composition, and an explicit fixture graph with deterministic teardown.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    PASARELA Architecture                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌────────────┐              │
//! │  │ Fixture   │   │ Page      │   │ Driver     │              │
//! │  │ Registry  │──►│ Objects   │──►│ (trait     │──► browser   │
//! │  │ (graph)   │   │ (login,   │   │  object)   │              │
//! │  └───────────┘   │  home)    │   └────────────┘              │
//! │        ▲         └───────────┘                               │
//! │  ┌───────────┐                                               │
//! │  │ Env       │  TEST_ENV / BASE_URL / CI / DOCKER            │
//! │  │ Resolver  │  ──► base URL, credentials, retries, workers  │
//! │  └───────────┘                                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pasarela::config::{capture_process_env, resolve, CliOverrides};
//! use pasarela::harness::{standard_registry, DriverFactory, ValidLogin, VALID_LOGIN_FIXTURE};
//!
//! # fn driver_factory() -> DriverFactory { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> pasarela::HarnessResult<()> {
//!     let resolution = resolve(&capture_process_env(), &CliOverrides::default());
//!     let registry = standard_registry(resolution.config, driver_factory());
//!
//!     let mut fixtures = registry.build(&[VALID_LOGIN_FIXTURE]).await?;
//!     fixtures.get::<ValidLogin>(VALID_LOGIN_FIXTURE)?.run().await?;
//!     fixtures.teardown().await
//! }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod config;
pub mod descriptor;
pub mod driver;
pub mod fixture;
pub mod harness;
pub mod page;
pub mod pages;
pub mod result;

pub use config::{CliOverrides, Credentials, EnvConfig, Environment, Resolution};
pub use descriptor::{AriaRole, ElementDescriptor};
pub use driver::{Driver, ElementHandle, ElementState, LoadState, SimulatedDriver, UrlPattern};
pub use fixture::{FixtureRegistry, FixtureSet, FixtureValue};
pub use harness::{standard_registry, InvalidLogin, SharedDriver, ValidLogin};
pub use page::PageActions;
pub use pages::{HomePage, LoginField, LoginPage};
pub use result::{HarnessError, HarnessResult};
