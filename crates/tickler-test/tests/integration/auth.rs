//! Sign-in and session cookie integration tests.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

const PASSWORD: &str = "correct horse";

async fn sign_in(service: &salvo::Service) -> String {
    TestRequest::post("/api/signin")
        .json_body(&json!({"password": PASSWORD}))
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json()["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// ## Summary
/// Test that task routes need a session when a password is configured.
#[test_log::test(tokio::test)]
async fn task_routes_require_token() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_auth_test_service(&test_db, PASSWORD);

    TestRequest::get("/api/tasks")
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_body_contains("\"error\"");
    TestRequest::post("/api/task")
        .json_body(&json!({"title": "Sneaky"}))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    TestRequest::post("/api/task/done?id=1")
        .token("forged")
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(test_db.count_tasks().await.expect("count"), 0);
}

/// ## Summary
/// Test that a signed-in client can use the task routes.
#[test_log::test(tokio::test)]
async fn sign_in_token_opens_task_routes() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_auth_test_service(&test_db, PASSWORD);

    let token = sign_in(&service).await;

    TestRequest::post("/api/task")
        .token(&token)
        .json_body(&json!({"title": "Allowed", "date": "20990101"}))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let body = TestRequest::get("/api/tasks")
        .token(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["tasks"][0]["title"], json!("Allowed"));
}

/// ## Summary
/// Test that sign-in sets the session cookie as well as returning the token.
#[test_log::test(tokio::test)]
async fn sign_in_sets_cookie() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_auth_test_service(&test_db, PASSWORD);

    let response = TestRequest::post("/api/signin")
        .json_body(&json!({"password": PASSWORD}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    let token = response.json()["token"]
        .as_str()
        .expect("token should be a string")
        .to_string();

    response.assert_header_contains("Set-Cookie", &format!("token={token}"));
}

/// ## Summary
/// Test that a wrong or missing password is 401 with an error body.
#[test_log::test(tokio::test)]
async fn wrong_password_is_unauthorized() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_auth_test_service(&test_db, PASSWORD);

    for body in [json!({"password": "wrong"}), json!({})] {
        TestRequest::post("/api/signin")
            .json_body(&body)
            .send(&service)
            .await
            .assert_status(StatusCode::UNAUTHORIZED)
            .assert_body_contains("\"error\"");
    }
}

/// ## Summary
/// Test that without a configured password sign-in fails but tasks are open.
#[test_log::test(tokio::test)]
async fn no_password_disables_auth() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    TestRequest::post("/api/signin")
        .json_body(&json!({"password": ""}))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    TestRequest::get("/api/tasks")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}

/// ## Summary
/// Test that public routes stay open when a password is configured.
#[test_log::test(tokio::test)]
async fn public_routes_need_no_token() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_auth_test_service(&test_db, PASSWORD);

    TestRequest::get("/api/healthcheck")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
    TestRequest::get("/api/nextdate?now=20240126&date=20240126&repeat=d%201")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}
