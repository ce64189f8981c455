//! Element locators and their resolution contract.
//!
//! A [`Locator`] describes one element by accessible role and name, by text
//! content, or by a CSS selector optionally filtered by contained text.
//! Every variant resolves the same way: the page reports how many elements
//! match, and the locator's [`Pick`] decides whether more than one match is
//! an ambiguity ("strict mode") or whether the first match is taken.
//!
//! Text matching normalizes whitespace. Substring matches are
//! case-insensitive; exact matches compare the whole normalized text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The attribute the resolver puts on the matched element so that a
/// follow-up interaction can address it with a plain CSS selector.
pub const TAG_ATTRIBUTE: &str = "data-pagecheck";

const LOCATE_SCRIPT: &str = include_str!("locate.js");

/// What to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// An element with the given ARIA role (explicit or implicit) whose
    /// accessible name matches `name`.
    Role {
        /// ARIA role, e.g. `button`, `heading`, `link`
        role: String,
        /// Accessible name to match; `None` matches any name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Require the whole name to match
        #[serde(default)]
        exact: bool,
    },
    /// The innermost elements whose text content matches.
    Text {
        /// Text to match
        text: String,
        /// Require the whole text to match
        #[serde(default)]
        exact: bool,
    },
    /// A CSS selector, optionally narrowed to elements containing text.
    Selector {
        /// CSS selector
        css: String,
        /// Substring the element's text must contain
        #[serde(default, skip_serializing_if = "Option::is_none")]
        has_text: Option<String>,
    },
}

/// How several matches are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pick {
    /// Exactly one element must match.
    #[default]
    Strict,
    /// The first match in document order is used.
    First,
}

/// A description of a single DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// What to look for
    #[serde(flatten)]
    pub target: Target,
    /// How several matches are treated
    #[serde(default)]
    pub pick: Pick,
}

impl Locator {
    /// Locates by ARIA role and accessible name (substring match).
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from(Target::Role {
            role: role.into(),
            name: Some(name.into()),
            exact: false,
        })
    }

    /// Locates by text content (substring match).
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::from(Target::Text {
            text: text.into(),
            exact: false,
        })
    }

    /// Locates by CSS selector.
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self::from(Target::Selector {
            css: css.into(),
            has_text: None,
        })
    }

    /// Requires the whole text or name to match. No effect on selectors.
    #[must_use]
    pub fn exact(mut self) -> Self {
        match &mut self.target {
            Target::Role { exact, .. } | Target::Text { exact, .. } => *exact = true,
            Target::Selector { .. } => {}
        }
        self
    }

    /// Narrows a selector to elements containing `text`.
    ///
    /// On role and text locators this has no effect, they already match on
    /// text.
    #[must_use]
    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        if let Target::Selector { has_text, .. } = &mut self.target {
            *has_text = Some(text.into());
        }
        self
    }

    /// Takes the first match instead of failing on ambiguity.
    #[must_use]
    pub fn first(mut self) -> Self {
        self.pick = Pick::First;
        self
    }

    /// Builds the JavaScript expression that resolves this locator in the
    /// page and tags the chosen element with `token`.
    ///
    /// Arguments are JSON-encoded so locator text can never break out of the
    /// string literal.
    ///
    /// # Errors
    ///
    /// Returns an error if the locator cannot be serialized.
    pub fn resolve_script(&self, token: &str) -> serde_json::Result<String> {
        let query = serde_json::to_string(&ResolveQuery {
            target: &self.target,
            pick: self.pick,
        })?;
        let token = serde_json::to_string(token)?;
        Ok(format!("({})({query}, {token})", LOCATE_SCRIPT.trim()))
    }

    /// CSS selector addressing the element tagged with `token`.
    #[must_use]
    pub fn tagged_selector(token: &str) -> String {
        format!("[{TAG_ATTRIBUTE}=\"{token}\"]")
    }
}

impl From<Target> for Locator {
    fn from(target: Target) -> Self {
        Self {
            target,
            pick: Pick::Strict,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Role { role, name, exact } => {
                write!(f, "role={role}")?;
                if let Some(name) = name {
                    let op = if *exact { "=" } else { "~=" };
                    write!(f, "[name{op}{name:?}]")?;
                }
            }
            Target::Text { text, exact } => {
                if *exact {
                    write!(f, "text={text:?}")?;
                } else {
                    write!(f, "text~={text:?}")?;
                }
            }
            Target::Selector { css, has_text } => {
                write!(f, "{css}")?;
                if let Some(text) = has_text {
                    write!(f, ":has-text({text:?})")?;
                }
            }
        }
        if self.pick == Pick::First {
            write!(f, " >> first")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ResolveQuery<'a> {
    target: &'a Target,
    pick: Pick,
}

/// What the page reported for one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resolution {
    /// Number of matching elements
    pub count: usize,
    /// Whether the chosen element is visible
    pub visible: bool,
    /// Whether an element was chosen and tagged
    pub tagged: bool,
    /// Truncated markup of the first few matches
    #[serde(default)]
    pub samples: Vec<String>,
}

impl Resolution {
    /// True when an element was chosen and is visible.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.tagged && self.visible
    }

    /// Explains why this resolution does not satisfy a visibility check, or
    /// `None` if it does.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        if self.count == 0 {
            return Some("no element matches".to_string());
        }
        if !self.tagged {
            return Some(format!(
                "strict mode violation: {} elements match: {}",
                self.count,
                self.samples.join(" | ")
            ));
        }
        if !self.visible {
            return Some("element is not visible".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_describes_each_variant() {
        assert_eq!(
            Locator::role("button", "Q4.7").to_string(),
            "role=button[name~=\"Q4.7\"]"
        );
        assert_eq!(
            Locator::text("Q3.1").exact().to_string(),
            "text=\"Q3.1\""
        );
        assert_eq!(
            Locator::css("button").has_text("Q4.7").first().to_string(),
            "button:has-text(\"Q4.7\") >> first"
        );
    }

    #[test]
    fn exact_and_has_text_only_touch_relevant_variants() {
        let selector = Locator::css("h1").exact();
        assert_eq!(selector, Locator::css("h1"));

        let text = Locator::text("メッセージを書く").has_text("ignored");
        assert_eq!(text, Locator::text("メッセージを書く"));
    }

    #[test]
    fn resolve_script_embeds_json_arguments() {
        let locator = Locator::text("'); alert('x');//").exact();
        let script = locator.resolve_script("tok-1").unwrap();

        assert!(script.starts_with("((query, token) =>"));
        assert!(script.contains(
            r#"{"target":{"kind":"text","text":"'); alert('x');//","exact":true},"pick":"strict"}"#
        ));
        assert!(script.trim_end().ends_with(", \"tok-1\")"));
    }

    #[test]
    fn resolve_script_matches_rendered_text_only() {
        let script = Locator::role("button", "Q4.7").resolve_script("tok").unwrap();

        // textContent would include inline script bodies
        assert!(!script.contains("textContent"));
        assert!(script.contains(".filter(isExposed)"));
    }

    #[test]
    fn locator_deserializes_from_flat_json() {
        let locator: Locator =
            serde_json::from_str(r#"{"kind":"role","role":"heading","name":"計算理論とオートマトン"}"#)
                .unwrap();
        assert_eq!(locator, Locator::role("heading", "計算理論とオートマトン"));

        let locator: Locator = serde_json::from_str(
            r#"{"kind":"selector","css":"button","has_text":"Q4.7","pick":"first"}"#,
        )
        .unwrap();
        assert_eq!(locator, Locator::css("button").has_text("Q4.7").first());
    }

    #[test]
    fn resolution_failure_reasons() {
        let none = Resolution {
            count: 0,
            visible: false,
            tagged: false,
            samples: vec![],
        };
        assert_eq!(none.failure_reason().as_deref(), Some("no element matches"));

        let ambiguous = Resolution {
            count: 2,
            visible: false,
            tagged: false,
            samples: vec!["<p>充足不可能である。</p>".into(), "<p>…充足不可能である。</p>".into()],
        };
        let reason = ambiguous.failure_reason().unwrap();
        assert!(reason.starts_with("strict mode violation: 2 elements match"));
        assert!(reason.contains("<p>充足不可能である。</p>"));

        let hidden = Resolution {
            count: 1,
            visible: false,
            tagged: true,
            samples: vec![],
        };
        assert_eq!(hidden.failure_reason().as_deref(), Some("element is not visible"));
        assert!(!hidden.is_actionable());

        let ok = Resolution {
            count: 3,
            visible: true,
            tagged: true,
            samples: vec![],
        };
        assert!(ok.failure_reason().is_none());
        assert!(ok.is_actionable());
    }

    #[test]
    fn tagged_selector_uses_attribute() {
        assert_eq!(
            Locator::tagged_selector("abc"),
            "[data-pagecheck=\"abc\"]"
        );
    }
}
