//! Built-in scenarios for the target application.
//!
//! Paths are relative to the configured base URL and screenshots to the
//! configured output directory, so re-running overwrites the same files.

use pagecheck_browser::{Locator, Readiness, Scenario};
use std::time::Duration;

const ACCORDION_SETTLE: Duration = Duration::from_millis(500);
const ANIMATION_SETTLE: Duration = Duration::from_millis(1000);

/// Every built-in scenario, in the order `--all` runs them.
pub fn builtin() -> Vec<Scenario> {
    vec![automaton(), automaton_mistakes(), contact_search(), ui_text()]
}

/// Looks up a built-in scenario by name.
pub fn find(name: &str) -> Option<Scenario> {
    builtin().into_iter().find(|s| s.name == name)
}

/// Comma-separated names, for error hints.
pub fn names(scenarios: &[Scenario]) -> String {
    scenarios
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn automaton() -> Scenario {
    Scenario::new(
        "automaton",
        "Automaton quiz: heading and questions render, Q4.7 expands to its answer",
    )
    .open("/automaton")
    .await_ready(Readiness::text("計算理論とオートマトン"))
    .assert_visible(Locator::role("heading", "計算理論とオートマトン"))
    .assert_visible(Locator::text("Q4.3"))
    .capture("automaton_initial.png")
    .click_and_settle(Locator::role("button", "Q4.7"), ACCORDION_SETTLE)
    // The answer also appears inside the explanation
    .assert_visible(Locator::text("充足不可能である。").exact())
    .capture_changed("automaton_expanded.png", "automaton_initial.png")
}

fn automaton_mistakes() -> Scenario {
    Scenario::new(
        "automaton-mistakes",
        "Automaton quiz: section accordion, answer with Common Mistakes and Formal Proof",
    )
    .open("/automaton")
    .await_ready(Readiness::text("計算理論とオートマトン"))
    .assert_visible(Locator::role("button", "Section 3: Computability Theory"))
    // Section 3 is open by default; exact keeps Q3.10 and up out
    .assert_visible(Locator::text("Q3.1").exact())
    .assert_visible(Locator::role("button", "Section 4: Complexity Theory"))
    .click_and_settle(
        Locator::role("button", "Section 4: Complexity Theory"),
        ACCORDION_SETTLE,
    )
    .assert_visible(Locator::text("Q4.3").exact())
    // The answer panel animates open; settle before the final capture
    .click_and_settle(
        Locator::css("button").has_text("Q4.7").first(),
        ANIMATION_SETTLE,
    )
    .assert_visible(Locator::text("充足不可能").first())
    .assert_visible(Locator::text("Common Mistakes"))
    .assert_visible(Locator::text("Formal Proof"))
    .capture("automaton_mistakes.png")
}

fn contact_search() -> Scenario {
    Scenario::new(
        "contact-search",
        "Contact and search pages carry the updated copy",
    )
    .open("/contact")
    .await_ready(Readiness::NetworkIdle)
    .assert_content("メッセージを送る")
    .capture("contact_page.png")
    .open("/search")
    .await_ready(Readiness::NetworkIdle)
    .assert_content("キーワードやカテゴリーからお店を探せます")
    .capture("search_page.png")
}

fn ui_text() -> Scenario {
    Scenario::new(
        "ui-text",
        "Signup, login and kotodute pages show their headings, links and buttons",
    )
    .open("/signup")
    .await_ready(Readiness::NetworkIdle)
    .assert_visible(Locator::css("h1").has_text("アカウント作成"))
    .capture("verification_signup.png")
    .open("/login")
    .await_ready(Readiness::NetworkIdle)
    .assert_visible(Locator::role("link", "初めての方は アカウント作成"))
    .capture("verification_login.png")
    .open("/kotodute")
    .await_ready(Readiness::NetworkIdle)
    .assert_visible(Locator::text("メッセージを書く").first())
    .assert_visible(Locator::text("みんなのことづて").first())
    .assert_visible(Locator::role("button", "メッセージを送る"))
    .capture("verification_kotodute.png")
}
