use axum::http::{header, HeaderValue, StatusCode};
use serde_json::json;
use wiremock::matchers::{any, header as has_header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::backend::AUTH_HEADER;
use crate::test_utils::{TestApp, TEST_CREDENTIAL};

fn cookie(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap()
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn members_fixture(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/members/getMembers"))
        .and(has_header(AUTH_HEADER, TEST_CREDENTIAL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m1", "name": "Asha Rao", "email_id": "asha@example.com", "phone": "98765", "joined_at": "2025-01-05"},
            {"id": "m2", "name": "Vikram Shah", "email_id": "vik@ironden.in", "phone": "12345", "joined_at": "2025-02-10"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn protected_screens_redirect_without_session_and_never_call_backend() {
    let backend = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    for route in ["/dashboard", "/members", "/payments", "/members/m1/payments"] {
        let response = app.server.get(route).await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER, "{route}");
        assert_eq!(location(&response), "/", "{route}");
    }
}

#[tokio::test]
async fn entry_page_shows_login_or_skips_to_dashboard() {
    let backend = MockServer::start().await;
    let app = TestApp::new(&backend.uri());

    let anonymous = app.server.get("/").await;
    assert_eq!(anonymous.status_code(), StatusCode::OK);
    assert!(anonymous.text().contains("Sign In"));

    let signup = app.server.get("/?mode=signup").await;
    assert!(signup.text().contains("Create Account"));

    let signed_in = app
        .server
        .get("/")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await;
    assert_eq!(signed_in.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_in), "/dashboard");
}

#[tokio::test]
async fn login_stores_session_and_goes_to_dashboard() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gyms/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(AUTH_HEADER, TEST_CREDENTIAL)
                .set_body_json(json!({"name": "Iron Den", "email_id": "admin@gym.com"})),
        )
        .expect(1)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/login")
        .form(&[("email", "admin@gym.com"), ("password", "password")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("gymdash_session="));
    assert_eq!(app.session_count(), 1);
}

#[tokio::test]
async fn login_without_credential_header_writes_nothing() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gyms/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Iron Den"})))
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/login")
        .form(&[("email", "admin@gym.com"), ("password", "password")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(response.text().contains("Invalid email or password."));
    assert_eq!(app.session_count(), 0);
}

#[tokio::test]
async fn signup_password_mismatch_never_reaches_backend() {
    let backend = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/signup")
        .form(&[
            ("name", "Iron Den"),
            ("phone", "12345"),
            ("email", "owner@ironden.in"),
            ("password", "secret"),
            ("confirm_password", "different"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Passwords do not match"));
    assert_eq!(app.session_count(), 0);
}

#[tokio::test]
async fn members_screen_filters_by_query() {
    let backend = MockServer::start().await;
    members_fixture(&backend).await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .get("/members?q=ASHA")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Asha Rao"));
    assert!(!html.contains("Vikram Shah"));
    assert!(html.contains("payments?name=Asha+Rao"));
}

#[tokio::test]
async fn add_member_with_blank_field_is_rejected_locally() {
    let backend = MockServer::start().await;
    members_fixture(&backend).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/members")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .form(&[
            ("name", "Asha"),
            ("phone", ""),
            ("email", "asha@example.com"),
            ("joined_at", "2025-06-01"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Please provide all required fields"));
    assert!(html.contains("value=\"asha@example.com\""));
    assert!(html.contains("Vikram Shah"));
}

#[tokio::test]
async fn add_payment_with_blank_field_keeps_existing_payments() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/getPayments"))
        .and(query_param("member_id", "m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-old",
            "payment_type": "Cash",
            "amount": 800,
            "paid_at": {"value": "2025-05-01"},
            "paid_till": {"value": "2025-06-01"}
        }])))
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/members/m1/payments?name=Asha%20Rao")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .form(&[
            ("payment_type", "Gpay"),
            ("payment_id", ""),
            ("amount", ""),
            ("paid_at", "2025-06-01"),
            ("paid_till", "2025-07-01"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Please provide all required fields"));
    assert!(html.contains("p-old"));
    assert!(!html.contains("No payment information available."));
}

#[tokio::test]
async fn add_member_success_returns_to_member_list() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/members/createMembers"))
        .and(has_header(AUTH_HEADER, TEST_CREDENTIAL))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "m3"})))
        .expect(1)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/members")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .form(&[
            ("name", "Asha"),
            ("phone", "98765"),
            ("email", "asha@example.com"),
            ("joined_at", "2025-06-01"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/members");
}

#[tokio::test]
async fn add_member_rejection_shows_server_message() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/members/createMembers"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Member already exists"})))
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .post("/members")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .form(&[
            ("name", "Asha"),
            ("phone", "98765"),
            ("email", "asha@example.com"),
            ("joined_at", "2025-06-01"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Member already exists"));
}

#[tokio::test]
async fn added_payment_is_visible_on_the_drawer_it_returns_to() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments/createPayments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p-new"})))
        .expect(1)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/getPayments"))
        .and(query_param("member_id", "m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-new",
            "member_id": "m1",
            "member_name": "Asha Rao",
            "payment_type": "Gpay",
            "amount": 1500,
            "paid_at": {"value": "2025-06-01"},
            "paid_till": {"value": "2025-07-01"}
        }])))
        .expect(1)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());
    let session = app.sign_in();

    let created = app
        .server
        .post("/members/m1/payments?name=Asha%20Rao")
        .add_header(header::COOKIE, cookie(&session))
        .form(&[
            ("payment_type", "Gpay"),
            ("payment_id", ""),
            ("amount", "1500"),
            ("paid_at", "2025-06-01"),
            ("paid_till", "2025-07-01"),
        ])
        .await;
    assert_eq!(created.status_code(), StatusCode::SEE_OTHER);
    let drawer = location(&created);
    assert_eq!(drawer, "/members/m1/payments?name=Asha+Rao");

    let reloaded = app
        .server
        .get(&drawer)
        .add_header(header::COOKIE, cookie(&session))
        .await;
    let html = reloaded.text();
    assert!(html.contains("p-new"));
    assert!(html.contains("01-Jun-2025"));
    assert!(html.contains("01-Jul-2025"));
}

#[tokio::test]
async fn payments_ledger_pages_through_results() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/getPaymentsByGym"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .and(query_param("startDate", "2025-06-01"))
        .and(query_param("endDate", "2025-06-30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "p1", "member_id": "m1", "member_name": "Asha Rao", "payment_type": "Cash",
                "amount": 800, "paid_at": {"value": "2025-06-02"}, "paid_till": {"value": "2025-07-02"}
            }],
            "totalCount": 45,
            "totalAmount": 36000,
            "currentMonthAmount": 12000
        })))
        .expect(1)
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .get("/payments?start_date=2025-06-01&end_date=2025-06-30")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Rs 12000"));
    assert!(html.contains("Revenue 01 Jun 25 to 30 Jun 25"));
    assert!(html.contains("Rs 36000"));
    assert!(html.contains("class=\"button disabled\">Previous"));
    assert!(html.contains("page=2"));
}

#[tokio::test]
async fn refused_credential_ends_the_session() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/getMembers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let response = app
        .server
        .get("/members")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(app.session_count(), 0);
}

#[tokio::test]
async fn backend_outage_shows_banner_instead_of_failing() {
    let app = TestApp::new("http://127.0.0.1:1");

    let response = app
        .server
        .get("/dashboard")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(html.contains("No pending payments."));
}

#[tokio::test]
async fn dashboard_shows_counts_and_renewals() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gyms/getDashboardDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "memberCount": 42,
            "totalActiveMembers": 30,
            "revenue": 56000,
            "upcomingPayments": [{"name": "Vikram Shah", "paid_till": {"value": "2025-06-20T00:00:00Z"}}]
        })))
        .mount(&backend)
        .await;
    let app = TestApp::new(&backend.uri());

    let html = app
        .server
        .get("/dashboard")
        .add_header(header::COOKIE, cookie(&app.sign_in()))
        .await
        .text();

    assert!(html.contains("Iron Den"));
    assert!(html.contains("42"));
    assert!(html.contains("Rs 56000"));
    assert!(html.contains("Vikram Shah"));
    assert!(html.contains("20-Jun-2025"));
}

#[tokio::test]
async fn logout_forgets_the_session() {
    let backend = MockServer::start().await;
    let app = TestApp::new(&backend.uri());
    let session = app.sign_in();
    assert_eq!(app.session_count(), 1);

    let response = app
        .server
        .post("/logout")
        .add_header(header::COOKIE, cookie(&session))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(app.session_count(), 0);
}
