#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;
use tower::ServiceExt;

use msl_school::config::AppConfig;
use msl_school::infrastructure::database::entities;
use msl_school::server::build_state;
use msl_school::{create_app, init_database, run_migrations, AppState, DatabaseConfig};

pub const ORIGIN: &str = "http://localhost:3001";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();

        let mut config = AppConfig::default();
        config.auth.secret = "integration-test-secret".to_string();
        config.auth.bcrypt_cost = 4;

        let state = build_state(db.clone(), &config);
        let router = create_app(state.clone(), ORIGIN);
        Self { router, db, state }
    }

    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.call(Method::POST, path, Some(body), None).await
    }

    pub async fn post_auth(&self, path: &str, body: Option<Value>, token: &str) -> TestResponse {
        self.call(Method::POST, path, body, Some(token)).await
    }

    pub async fn session_rows(&self) -> u64 {
        entities::Session::find().count(&self.db).await.unwrap()
    }

    /// Sign up then sign in; returns the bearer token.
    pub async fn signed_in(&self, email: &str, password: &str) -> String {
        let res = self
            .post(
                "/rpc/auth/signUp",
                serde_json::json!({ "name": "Test User", "email": email, "password": password }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);

        let res = self
            .post(
                "/rpc/auth/signIn",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }
}
