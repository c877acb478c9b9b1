mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::TestApp;
use msl_school::application::run_seed;

#[tokio::test]
async fn liveness_routes() {
    let app = TestApp::new().await;

    let res = app.call(Method::GET, "/", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!("OK"));

    let res = app.call(Method::GET, "/rpc/healthCheck", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!("OK"));

    let res = app.call(Method::POST, "/rpc/healthCheck", None, None).await;
    assert_eq!(res.body, json!("OK"));
}

#[tokio::test]
async fn unknown_procedure_is_not_matched() {
    let app = TestApp::new().await;
    let res = app.call(Method::POST, "/rpc/nope", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Handler did not match");
}

#[tokio::test]
async fn sign_in_without_identity_fails_validation() {
    let app = TestApp::new().await;
    let res = app
        .post("/rpc/auth/signIn", json!({ "password": "whatever" }))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");
    assert_eq!(res.body["message"], "Input validation failed");
    assert!(res.body["data"]["issues"].as_array().is_some());
    assert_eq!(app.session_rows().await, 0);
}

#[tokio::test]
async fn sign_in_issues_session_and_cookie() {
    let app = TestApp::new().await;
    app.signed_in("alice@example.com", "correct horse").await;
    assert_eq!(app.session_rows().await, 1);

    let res = app
        .post(
            "/rpc/auth/signIn",
            json!({ "email": "ALICE@example.com", "password": "correct horse" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["user"]["email"], "alice@example.com");
    assert!(res.body["session"]["id"].is_string());
    assert!(res.body["user"].get("password").is_none());

    let cookie = res.set_cookie.expect("session cookie");
    assert!(cookie.starts_with("msl.session_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn wrong_password_creates_no_session() {
    let app = TestApp::new().await;
    app.post(
        "/rpc/auth/signUp",
        json!({ "name": "Bob", "email": "bob@example.com", "password": "password123" }),
    )
    .await;

    for body in [
        json!({ "email": "bob@example.com", "password": "password124" }),
        json!({ "email": "nobody@example.com", "password": "password123" }),
        json!({ "username": "bob", "password": "password123" }),
    ] {
        let res = app.post("/rpc/auth/signIn", body).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["code"], "UNAUTHORIZED");
        assert_eq!(res.body["message"], "Invalid credentials");
    }
    assert_eq!(app.session_rows().await, 0);
}

#[tokio::test]
async fn sign_up_rules() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Carol", "email": "carol@example.com", "password": "longenough", "username": "carol" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["username"], "carol");
    assert!(res.set_cookie.is_none());
    assert_eq!(app.session_rows().await, 0);

    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Carol 2", "email": "carol@example.com", "password": "longenough" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Other", "email": "other@example.com", "password": "longenough", "username": "carol" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Short", "email": "short@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Input validation failed");
}

#[tokio::test]
async fn protected_procedures_require_a_session() {
    let app = TestApp::new().await;

    let res = app.call(Method::POST, "/rpc/privateData", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "UNAUTHORIZED");

    let res = app
        .call(Method::GET, "/rpc/academic/departments/list", None, None)
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post_auth("/rpc/privateData", None, "not-a-real-token")
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let token = app.signed_in("dave@example.com", "password123").await;
    let res = app.post_auth("/rpc/privateData", None, &token).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "This is private");
    assert_eq!(res.body["user"]["email"], "dave@example.com");
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let app = TestApp::new().await;
    let token = app.signed_in("erin@example.com", "password123").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/rpc/auth/getSession")
        .header(header::COOKIE, format!("theme=dark; msl.session_token={token}"))
        .body(Body::empty())
        .unwrap();
    let res = app.send(request).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["email"], "erin@example.com");
}

#[tokio::test]
async fn get_session_tracks_sign_in_and_sign_out() {
    let app = TestApp::new().await;

    let res = app.call(Method::POST, "/rpc/auth/getSession", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["session"].is_null());
    assert!(res.body["user"].is_null());

    let token = app.signed_in("frank@example.com", "password123").await;
    let res = app.post_auth("/rpc/auth/getSession", None, &token).await;
    assert_eq!(res.body["user"]["email"], "frank@example.com");

    let res = app.post_auth("/rpc/auth/signOut", None, &token).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert!(res.set_cookie.unwrap().contains("Max-Age=0"));
    assert_eq!(app.session_rows().await, 0);

    let res = app.post_auth("/rpc/auth/getSession", None, &token).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["session"].is_null());

    let res = app.post_auth("/rpc/privateData", None, &token).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    // Signing out again is still a success.
    let res = app.post_auth("/rpc/auth/signOut", None, &token).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn seeded_teacher_can_sign_in_by_username() {
    let app = TestApp::new().await;
    run_seed(app.state.repos.as_ref()).await.unwrap();

    let res = app
        .post(
            "/rpc/auth/signIn",
            json!({ "username": "teacher1", "password": "password" }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["success"], true);
    assert!(res.body["session"].is_object());
    assert_eq!(res.body["user"]["username"], "teacher1");
    assert_eq!(res.body["user"]["role"], "Teacher");
}

#[tokio::test]
async fn input_procedures() {
    let app = TestApp::new().await;

    let res = app.post("/rpc/simpleTest", json!("World")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Hello World");

    let res = app
        .post(
            "/rpc/testInput",
            json!({ "email": "x@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["received"]["email"], "x@example.com");

    let res = app
        .post(
            "/rpc/testInput",
            json!({ "email": "not-an-email", "password": "password123" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/rpc/auth/signIn")
        .header(header::ORIGIN, common::ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        common::ORIGIN
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn password_suffix_past_72_bytes_is_not_ignored() {
    let app = TestApp::new().await;
    let prefix = "a".repeat(72);

    // A password bcrypt would truncate is refused outright.
    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Long", "email": "long@example.com", "password": format!("{prefix}REAL-SUFFIX") }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Input validation failed");

    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "Edge", "email": "edge@example.com", "password": prefix }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post(
            "/rpc/auth/signIn",
            json!({ "email": "edge@example.com", "password": format!("{prefix}totally-wrong") }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "UNAUTHORIZED");
    assert_eq!(app.session_rows().await, 0);
}

#[tokio::test]
async fn thai_password_over_72_bytes_is_refused() {
    let app = TestApp::new().await;
    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "สมใจ", "email": "thai@example.com", "password": "รหัสผ่านที่ยาวมากเกินไปสำหรับระบบ" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = TestApp::new().await;
    let res = app
        .post(
            "/rpc/auth/signUp",
            json!({ "name": "   ", "email": "blank@example.com", "password": "password123" }),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Input validation failed");
    let issues = res.body["data"]["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["path"] == "name"));

    let res = app
        .post(
            "/rpc/auth/signIn",
            json!({ "email": "blank@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
