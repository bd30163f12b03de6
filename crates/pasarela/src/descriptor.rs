//! Semantic element descriptors.
//!
//! A descriptor is a *query*, not a cached handle: it is re-evaluated through
//! the driver on every call, because the underlying DOM mutates between
//! actions. Descriptors identify elements the way a user would — by
//! accessibility role and name, or by visible text — so page objects never
//! carry raw CSS/XPath strings.

use serde::{Deserialize, Serialize};

/// Accessibility roles the harness queries by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// Text input field
    Textbox,
    /// Clickable button
    Button,
    /// Section heading
    Heading,
    /// Alert / validation message region
    Alert,
    /// Hyperlink
    Link,
}

impl AriaRole {
    /// Role name as it appears in the accessibility tree
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Textbox => "textbox",
            Self::Button => "button",
            Self::Heading => "heading",
            Self::Alert => "alert",
            Self::Link => "link",
        }
    }
}

impl std::fmt::Display for AriaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A semantic reference to zero, one, or many elements.
///
/// Matching semantics:
/// - `Role` matches on accessibility role plus exact accessible name.
/// - `Text` matches on rendered text, exact or substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "lowercase")]
pub enum ElementDescriptor {
    /// Role + accessible name (e.g. textbox named "Username")
    Role {
        /// Accessibility role
        role: AriaRole,
        /// Accessible name, matched exactly
        name: String,
    },
    /// Rendered text content
    Text {
        /// Text to match
        text: String,
        /// Whole-text match when true, substring otherwise
        exact: bool,
    },
}

impl ElementDescriptor {
    /// Descriptor for an element by role and accessible name
    #[must_use]
    pub fn role(role: AriaRole, name: impl Into<String>) -> Self {
        Self::Role {
            role,
            name: name.into(),
        }
    }

    /// Descriptor for an element containing the given text
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: false,
        }
    }

    /// Descriptor for an element whose text equals the given string exactly
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: true,
        }
    }

    /// Evaluate this descriptor against one element's semantics.
    ///
    /// Drivers use this to filter their element set; the harness never
    /// caches the outcome.
    #[must_use]
    pub fn matches(&self, role: Option<AriaRole>, name: &str, text: &str) -> bool {
        match self {
            Self::Role {
                role: wanted,
                name: wanted_name,
            } => role == Some(*wanted) && name == wanted_name,
            Self::Text {
                text: wanted,
                exact,
            } => {
                if *exact {
                    text == wanted
                } else {
                    text.contains(wanted.as_str())
                }
            }
        }
    }
}

impl std::fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role { role, name } => write!(f, "role={role} name={name:?}"),
            Self::Text { text, exact } => {
                if *exact {
                    write!(f, "text={text:?} (exact)")
                } else {
                    write!(f, "text~={text:?}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod role_tests {
        use super::*;

        #[test]
        fn test_role_names() {
            assert_eq!(AriaRole::Textbox.as_str(), "textbox");
            assert_eq!(AriaRole::Button.as_str(), "button");
            assert_eq!(AriaRole::Heading.as_str(), "heading");
            assert_eq!(AriaRole::Alert.as_str(), "alert");
            assert_eq!(AriaRole::Link.as_str(), "link");
        }

        #[test]
        fn test_role_match_requires_both_role_and_name() {
            let d = ElementDescriptor::role(AriaRole::Button, "Login");
            assert!(d.matches(Some(AriaRole::Button), "Login", "Login"));
            assert!(!d.matches(Some(AriaRole::Button), "Logout", "Login"));
            assert!(!d.matches(Some(AriaRole::Link), "Login", "Login"));
            assert!(!d.matches(None, "Login", "Login"));
        }
    }

    mod text_tests {
        use super::*;

        #[test]
        fn test_substring_match() {
            let d = ElementDescriptor::text("Welcome");
            assert!(d.matches(None, "", "Welcome demouser"));
            assert!(!d.matches(None, "", "Log in"));
        }

        #[test]
        fn test_exact_match() {
            let d = ElementDescriptor::exact_text("Invalid username or password.");
            assert!(d.matches(None, "", "Invalid username or password."));
            assert!(!d.matches(None, "", "Invalid username or password. Try again."));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_role() {
            let d = ElementDescriptor::role(AriaRole::Heading, "Login to FashionHub");
            assert_eq!(d.to_string(), "role=heading name=\"Login to FashionHub\"");
        }

        #[test]
        fn test_display_text() {
            assert_eq!(
                ElementDescriptor::text("Welcome").to_string(),
                "text~=\"Welcome\""
            );
            assert_eq!(
                ElementDescriptor::exact_text("x").to_string(),
                "text=\"x\" (exact)"
            );
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_descriptor_round_trips_through_json() {
            let d = ElementDescriptor::role(AriaRole::Textbox, "Username");
            let json = serde_json::to_string(&d).unwrap();
            let back: ElementDescriptor = serde_json::from_str(&json).unwrap();
            assert_eq!(d, back);
        }
    }
}
