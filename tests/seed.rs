mod common;

use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use common::TestApp;
use msl_school::application::run_seed;
use msl_school::infrastructure::database::entities;

async fn counts(app: &TestApp) -> Vec<u64> {
    let db = &app.db;
    vec![
        entities::RolePermission::find().count(db).await.unwrap(),
        entities::User::find().count(db).await.unwrap(),
        entities::Account::find().count(db).await.unwrap(),
        entities::Department::find().count(db).await.unwrap(),
        entities::Level::find().count(db).await.unwrap(),
        entities::Program::find().count(db).await.unwrap(),
        entities::Classroom::find().count(db).await.unwrap(),
        entities::Teacher::find().count(db).await.unwrap(),
        entities::Student::find().count(db).await.unwrap(),
        entities::Course::find().count(db).await.unwrap(),
    ]
}

#[tokio::test]
async fn seed_is_idempotent() {
    let app = TestApp::new().await;
    let repos = app.state.repos.as_ref();

    let first = run_seed(repos).await.unwrap();
    let after_first = counts(&app).await;
    assert_eq!(after_first, vec![2, 3, 3, 1, 1, 1, 1, 1, 1, 1]);

    let second = run_seed(repos).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(counts(&app).await, after_first);
}

#[tokio::test]
async fn seeded_records_are_listed_to_signed_in_users() {
    let app = TestApp::new().await;
    run_seed(app.state.repos.as_ref()).await.unwrap();

    let res = app
        .post(
            "/rpc/auth/signIn",
            json!({ "username": "admin", "password": "password" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let token = res.body["token"].as_str().unwrap().to_string();

    let res = app
        .post_auth("/rpc/academic/students/list", None, &token)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body[0]["studentId"], "S2568001");

    let res = app.post_auth("/rpc/roles/list", None, &token).await;
    assert_eq!(res.status, StatusCode::OK);
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "teacher"]);
    assert_eq!(res.body[0]["permissions"]["system"], json!(["manage"]));
}

#[tokio::test]
async fn upsert_updates_by_natural_key() {
    let app = TestApp::new().await;
    let token = app.signed_in("registrar@example.com", "password123").await;

    for name in ["Science", "Sciences"] {
        let res = app
            .post_auth(
                "/rpc/academic/departments/upsert",
                Some(json!({ "departmentId": "SCI", "name": name })),
                &token,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    }

    let res = app
        .post_auth("/rpc/academic/departments/list", None, &token)
        .await;
    let rows = res.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Sciences");

    let res = app
        .post_auth(
            "/rpc/academic/programs/upsert",
            Some(json!({ "programId": "P1", "name": "Orphan", "department": "NOPE" })),
            &token,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");
}
