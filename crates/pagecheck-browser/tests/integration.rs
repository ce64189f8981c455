//! Integration tests for pagecheck-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked #[ignore]
//! by default. Run with: cargo test --package pagecheck-browser -- --ignored

use pagecheck_browser::{
    run_scenario, LocalApp, Locator, PageVerifier, Readiness, Scenario, TestBrowser,
    TestBrowserConfig, VerifierOptions, VerifyError, WaitConfig,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// An accordion page shaped like the quiz page: section 3 open by default,
/// section 4 collapsed, and the answer text repeated in an explanation.
const AUTOMATON_HTML: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head><meta charset="utf-8"><title>Automaton</title>
<style>.closed { display: none; }</style></head>
<body>
  <h1>計算理論とオートマトン</h1>
  <section>
    <button id="s3" onclick="toggle('b3')">Section 3: Computability Theory</button>
    <div id="b3">
      <button>Q3.1</button>
      <button>Q3.10</button>
    </div>
  </section>
  <section>
    <button id="s4" onclick="toggle('b4')">Section 4: Complexity Theory</button>
    <div id="b4" class="closed">
      <button>Q4.3</button>
      <button onclick="toggle('a47')">Q4.7 SAT の判定</button>
      <div id="a47" class="closed">
        <p>充足不可能である。</p>
        <p>解説: 全ての割り当てを試すと充足不可能である。</p>
        <p>Common Mistakes</p>
        <p>Formal Proof</p>
      </div>
    </div>
  </section>
  <script>
    function toggle(id) { document.getElementById(id).classList.toggle('closed'); }
    console.log("automaton ready");
  </script>
</body>
</html>"#;

const CONTACT_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Contact</title></head>
<body><form><button type="submit">メッセージを送る</button></form></body></html>"#;

/// Text that lives only in an inline script, and a send button duplicated
/// in a collapsed navigation menu.
const RESOLVER_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Resolver</title></head>
<body>
  <div><p>Q4.7</p><script>window.__data = { "answer": "Formal Proof" };</script></div>
  <nav style="display: none"><button>メッセージを送る</button></nav>
  <nav aria-hidden="true"><button>メッセージを書く</button></nav>
  <form><button type="submit">メッセージを送る</button></form>
  <a href="/kotodute">メッセージを書く</a>
  <button>メッセージを書く</button>
</body>
</html>"#;

/// Serves the fixture pages over plain HTTP on an ephemeral port.
async fn serve_fixture() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fixture server");
    let address = listener.local_addr().expect("no local address");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buffer = vec![0u8; 4096];
                let read = socket.read(&mut buffer).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buffer[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let (status, body) = match path {
                    "/automaton" => ("200 OK", AUTOMATON_HTML),
                    "/contact" => ("200 OK", CONTACT_HTML),
                    "/resolver" => ("200 OK", RESOLVER_HTML),
                    _ => ("404 Not Found", "<html><body>not found</body></html>"),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{address}")
}

fn options_in(dir: &std::path::Path) -> VerifierOptions {
    VerifierOptions {
        out_dir: dir.to_path_buf(),
        ready_timeout: Duration::from_secs(5),
        assert_timeout: Duration::from_secs(2),
        ..VerifierOptions::default()
    }
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_browser_launch_and_close() {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch browser");

    assert!(!browser.is_closed().await, "Browser should not be closed");

    browser
        .close()
        .await
        .expect("failed to close browser gracefully");
}

#[tokio::test]
#[ignore]
async fn test_page_navigation_data_url() {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    let data_url = format!("data:text/html,{}", urlencoding::encode(CONTACT_HTML));
    page.navigate(&data_url, WaitConfig::default())
        .await
        .expect("failed to navigate to data URL");

    let title = page.title().await.expect("failed to get title");
    assert_eq!(title, "Contact");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_accordion_checkpoints() {
    let base_url = serve_fixture().await;
    let app = LocalApp::new(base_url);
    let dir = tempfile::tempdir().expect("tempdir");

    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    let mut verifier = PageVerifier::new(page, &app, options_in(dir.path()));

    verifier.open("/automaton").await.expect("open");
    verifier
        .await_ready(&Readiness::text("計算理論とオートマトン"))
        .await
        .expect("ready");

    verifier
        .assert_visible(&Locator::role("heading", "計算理論とオートマトン"))
        .await
        .expect("heading visible");

    // Open by default: no click needed. Exact avoids also matching Q3.10.
    verifier
        .assert_visible(&Locator::text("Q3.1").exact())
        .await
        .expect("Q3.1 visible without interaction");

    // Collapsed by default
    let hidden = verifier.assert_visible(&Locator::text("Q4.3").exact()).await;
    assert!(
        matches!(&hidden, Err(VerifyError::AssertionFailed { reason, .. }) if reason.contains("not visible")),
        "{hidden:?}"
    );

    verifier
        .capture(std::path::Path::new("before.png"), None)
        .await
        .expect("capture before");

    verifier
        .interact(
            &Locator::role("button", "Section 4: Complexity Theory"),
            pagecheck_browser::Action::Click,
            Some(Duration::from_millis(300)),
        )
        .await
        .expect("open section 4");
    verifier
        .assert_visible(&Locator::text("Q4.3").exact())
        .await
        .expect("Q4.3 visible after opening section 4");

    verifier
        .interact(
            &Locator::css("button").has_text("Q4.7").first(),
            pagecheck_browser::Action::Click,
            Some(Duration::from_millis(300)),
        )
        .await
        .expect("open Q4.7");

    // The answer repeats in the explanation: substring match is ambiguous,
    // exact match resolves uniquely.
    let ambiguous = verifier.assert_visible(&Locator::text("充足不可能")).await;
    assert!(
        matches!(&ambiguous, Err(VerifyError::AssertionFailed { reason, .. }) if reason.contains("strict mode violation")),
        "{ambiguous:?}"
    );
    verifier
        .assert_visible(&Locator::text("充足不可能である。").exact())
        .await
        .expect("answer visible");

    let artifact = verifier
        .capture(
            std::path::Path::new("after.png"),
            Some(std::path::Path::new("before.png")),
        )
        .await
        .expect("capture after must differ from before");
    assert!(artifact.path.exists());

    let console = verifier.page().console().messages();
    assert!(console.iter().any(|m| m.text.contains("automaton ready")));

    let (page, artifacts) = verifier.into_parts();
    assert_eq!(artifacts.len(), 2);
    page.close().await.expect("close page");
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_run_scenario_reports_failure_and_screenshot() {
    let base_url = serve_fixture().await;
    let app = LocalApp::new(base_url);
    let dir = tempfile::tempdir().expect("tempdir");

    let scenario = Scenario::new("contact", "contact page copy")
        .open("/contact")
        .await_ready(Readiness::NetworkIdle)
        .assert_content("メッセージを送る")
        .capture("contact_page.png")
        .assert_content("存在しない文言");

    let report = run_scenario(
        TestBrowserConfig::default(),
        &app,
        &scenario,
        options_in(dir.path()),
    )
    .await
    .expect("launch");

    assert!(!report.passed());
    assert_eq!(report.checkpoints.len(), 5);
    assert_eq!(report.passed_count(), 4);
    assert!(matches!(
        report.failure,
        Some(VerifyError::AssertionFailed { .. })
    ));
    assert!(dir.path().join("contact_page.png").exists());
    assert!(dir.path().join("failure.png").exists());
}

#[tokio::test]
#[ignore]
async fn test_readiness_timeout_dumps_dom() {
    let base_url = serve_fixture().await;
    let app = LocalApp::new(base_url);
    let dir = tempfile::tempdir().expect("tempdir");

    let scenario = Scenario::new("missing", "text that never appears")
        .open("/contact")
        .await_ready(Readiness::text("決して現れない"));

    let mut options = options_in(dir.path());
    options.ready_timeout = Duration::from_millis(500);

    let report = run_scenario(TestBrowserConfig::default(), &app, &scenario, options)
        .await
        .expect("launch");

    assert!(matches!(
        report.failure,
        Some(VerifyError::ReadinessTimeout { .. })
    ));
    let dom = std::fs::read_to_string(dir.path().join("failure.html")).expect("DOM dump");
    assert!(dom.contains("メッセージを送る"));
}

#[tokio::test]
#[ignore]
async fn test_unreachable_app_is_navigation_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let app = LocalApp::new(format!("http://127.0.0.1:{port}"));
    let dir = tempfile::tempdir().expect("tempdir");
    let scenario = Scenario::new("down", "").open("/").await_ready(Readiness::Load);

    let report = run_scenario(
        TestBrowserConfig::default(),
        &app,
        &scenario,
        options_in(dir.path()),
    )
    .await
    .expect("launch");

    assert!(matches!(report.failure, Some(VerifyError::Navigation { .. })));
    assert_eq!(report.checkpoints.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_locators_ignore_script_text_and_hidden_roles() {
    let base_url = serve_fixture().await;
    let app = LocalApp::new(base_url);
    let dir = tempfile::tempdir().expect("tempdir");

    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    let verifier = PageVerifier::new(page, &app, options_in(dir.path()));

    verifier.open("/resolver").await.expect("open");
    verifier
        .await_ready(&Readiness::text("Q4.7"))
        .await
        .expect("ready");

    // Present only in an inline script, so never rendered
    let script_only = verifier.assert_visible(&Locator::text("Formal Proof")).await;
    assert!(
        matches!(&script_only, Err(VerifyError::AssertionFailed { reason, .. }) if reason == "no element matches"),
        "{script_only:?}"
    );
    let script_only = verifier
        .assert_visible(&Locator::css("div").has_text("Formal Proof"))
        .await;
    assert!(script_only.is_err(), "{script_only:?}");

    // The copy inside the hidden menu is outside the accessibility tree
    verifier
        .assert_visible(&Locator::role("button", "メッセージを送る"))
        .await
        .expect("send button resolves uniquely");
    verifier
        .assert_visible(&Locator::role("button", "メッセージを書く"))
        .await
        .expect("aria-hidden copy is ignored");
    verifier
        .assert_visible(&Locator::role("link", "メッセージを書く"))
        .await
        .expect("link resolves by role");

    // Text matching still sees both rendered copies
    let ambiguous = verifier.assert_visible(&Locator::text("メッセージを書く")).await;
    assert!(
        matches!(&ambiguous, Err(VerifyError::AssertionFailed { reason, .. }) if reason.contains("strict mode violation")),
        "{ambiguous:?}"
    );

    let (page, _) = verifier.into_parts();
    page.close().await.expect("close page");
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_interact_on_missing_element_is_interaction_error() {
    let base_url = serve_fixture().await;
    let app = LocalApp::new(base_url);
    let dir = tempfile::tempdir().expect("tempdir");

    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    let verifier = PageVerifier::new(page, &app, options_in(dir.path()));

    verifier.open("/automaton").await.expect("open");
    verifier
        .await_ready(&Readiness::text("計算理論とオートマトン"))
        .await
        .expect("ready");

    let missing = verifier
        .interact(
            &Locator::role("button", "Q9.9"),
            pagecheck_browser::Action::Click,
            None,
        )
        .await;
    assert!(
        matches!(&missing, Err(VerifyError::InteractionFailed { reason, .. }) if reason == "no element matches"),
        "{missing:?}"
    );

    // Collapsed section: the question button is not exposed until opened
    let collapsed = verifier
        .interact(
            &Locator::role("button", "Q4.7"),
            pagecheck_browser::Action::Click,
            None,
        )
        .await;
    assert!(
        matches!(&collapsed, Err(VerifyError::InteractionFailed { .. })),
        "{collapsed:?}"
    );

    let (page, _) = verifier.into_parts();
    page.close().await.expect("close page");
    browser.close().await.expect("failed to close");
}
