//! Concrete page objects for the FashionHub screens.
//!
//! Each page declares the semantic descriptors of one logical screen and the
//! business operations available on it; driver-call convention lives in
//! [`crate::page::PageActions`].

mod home;
mod login;

pub use home::HomePage;
pub use login::{LoginField, LoginPage, INVALID_CREDENTIALS_ALERT, LOGIN_HEADING, LOGIN_PATH};
