#![allow(clippy::unwrap_used)]
// Integration tests for `GrillClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maklink_api::{Error, GrillClient, GrillId, PowerState, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GrillClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = GrillClient::new(
        base_url,
        "pitmaster",
        "test-password".to_string().into(),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn login_redirect() -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", "/Home/Index")
}

fn expired_redirect() -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", "/Home/Login")
}

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .respond_with(login_redirect())
        .mount(server)
        .await;
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn login_redirect_means_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .and(body_string_contains("Username=pitmaster"))
        .and(body_string_contains("RememberMe=false"))
        .respond_with(login_redirect())
        .mount(&server)
        .await;

    assert!(client.ensure_authenticated().await);
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn login_page_rerender_means_rejected_credentials() {
    let (server, client) = setup().await;

    // A 200 is the login form coming back, not a session.
    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    assert!(!client.ensure_authenticated().await);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_transport_failure_leaves_unauthenticated() {
    let base_url = Url::parse("http://127.0.0.1:9/").unwrap();
    let client = GrillClient::new(
        base_url,
        "pitmaster",
        "test-password".to_string().into(),
        &TransportConfig::default(),
    )
    .unwrap();

    assert!(!client.ensure_authenticated().await);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn cached_session_skips_login() {
    let (server, client) = setup().await;

    // Exactly one login no matter how many ensure calls follow.
    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .respond_with(login_redirect())
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.ensure_authenticated().await);
    assert!(client.ensure_authenticated().await);
    assert!(client.ensure_authenticated().await);
}

// ── Grill list tests ────────────────────────────────────────────────

#[tokio::test]
async fn list_grills_parses_page() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    let page = json!({
        "Data": [
            { "GrillId": "g-100", "Name": "Kitchen" },
            { "GrillId": "g-200", "Name": "Patio" }
        ],
        "Total": 2
    });

    Mock::given(method("POST"))
        .and(path("/Home/GrillsRead"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page))
        .mount(&server)
        .await;

    let grills = client.list_grills().await.unwrap();

    assert_eq!(grills.len(), 2);
    assert_eq!(grills[0].grill_id, GrillId::from("g-100"));
    assert_eq!(grills[0].name, "Kitchen");
    assert_eq!(grills[1].name, "Patio");
}

#[tokio::test]
async fn list_grills_redirect_expires_session() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/Home/GrillsRead"))
        .respond_with(expired_redirect())
        .mount(&server)
        .await;

    let result = client.list_grills().await;

    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn expired_session_relogs_in_on_next_call() {
    let (server, client) = setup().await;

    // One login for the initial session establishment.
    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .respond_with(login_redirect())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Home/GrillsRead"))
        .respond_with(expired_redirect())
        .expect(1)
        .mount(&server)
        .await;

    assert!(matches!(
        client.list_grills().await,
        Err(Error::SessionExpired)
    ));

    // Second call re-authenticates before hitting the endpoint again.
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/Home/Login"))
        .respond_with(login_redirect())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Home/GrillsRead"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Data": [], "Total": 0 })),
        )
        .mount(&server)
        .await;

    let grills = client.list_grills().await.unwrap();
    assert!(grills.is_empty());
    assert!(client.is_authenticated());
}

// ── Grill data tests ────────────────────────────────────────────────

#[tokio::test]
async fn grill_data_parses_reading() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    let reading = json!({
        "Connected": true,
        "GrillData": {
            "GrillId": "g-100",
            "Power": "COOLDOWN",
            "Probe1": "132",
            "Temp": 180
        },
        "SessionData": { "SetPoint": 225 }
    });

    Mock::given(method("POST"))
        .and(path("/Grill/GetAjaxGrillData/g-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&reading))
        .mount(&server)
        .await;

    let info = client.grill_data(&GrillId::from("g-100")).await.unwrap();

    assert!(info.connected);
    let data = info.grill_data.unwrap();
    assert_eq!(data.power, Some(PowerState::Cooldown));
    assert_eq!(data.temp, 180);
    assert_eq!(info.session_data.unwrap().set_point, 225);
}

#[tokio::test]
async fn error_body_preview_survives_multibyte_content() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    // An 'é' straddles the preview cutoff at byte 200.
    let body = format!("{}é — service indisponible", "x".repeat(199));
    Mock::given(method("POST"))
        .and(path("/Home/GrillsRead"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let result = client.list_grills().await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "x".repeat(199));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn deserialization_preview_survives_multibyte_content() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    let body = format!("{}é pas du JSON", "x".repeat(199));
    Mock::given(method("POST"))
        .and(path("/Grill/GetAjaxGrillData/g-100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let result = client.grill_data(&GrillId::from("g-100")).await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn grill_data_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/Grill/GetAjaxGrillData/g-100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.grill_data(&GrillId::from("g-100")).await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Setpoint tests ──────────────────────────────────────────────────

#[tokio::test]
async fn set_grill_temp_reports_success_status() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/Grill/SetGrillTemp/g-100"))
        .and(body_string_contains("SetPoint=225"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let status = client
        .set_grill_temp(&GrillId::from("g-100"), 225)
        .await
        .unwrap();
    assert!(status.is_success());
}

#[tokio::test]
async fn set_grill_temp_redirect_invalidates_session_but_reports_status() {
    let (server, client) = setup().await;
    mount_login_success(&server).await;

    Mock::given(method("POST"))
        .and(path("/Grill/SetGrillTemp/g-100"))
        .respond_with(expired_redirect())
        .mount(&server)
        .await;

    let status = client
        .set_grill_temp(&GrillId::from("g-100"), 225)
        .await
        .unwrap();

    assert!(status.is_redirection());
    assert!(!client.is_authenticated());
}
