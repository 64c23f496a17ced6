//! Task API integration tests.
//!
//! Runs the create, read, update, delete, done and list endpoints against a real
//! SQLite database with authentication disabled.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn task_path(id: impl std::fmt::Display) -> String {
    format!("/api/task?id={id}")
}

async fn create(service: &salvo::Service, body: &serde_json::Value) -> String {
    let response = TestRequest::post("/api/task")
        .json_body(body)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED);
    response.json()["id"]
        .as_i64()
        .expect("id should be a number")
        .to_string()
}

// ============================================================================
// Create
// ============================================================================

/// ## Summary
/// Test that a created task can be read back with a string id.
#[test_log::test(tokio::test)]
async fn create_then_get_round_trips_fields() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let id = create(
        &service,
        &json!({"date": "20990101", "title": "Dentist", "comment": "bring card", "repeat": "y"}),
    )
    .await;

    let task = TestRequest::get(&task_path(&id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        task,
        json!({
            "id": id,
            "date": "20990101",
            "title": "Dentist",
            "comment": "bring card",
            "repeat": "y",
        })
    );
}

/// ## Summary
/// Test that a missing or past date is stored as today.
#[test_log::test(tokio::test)]
async fn create_defaults_missing_and_past_dates_to_today() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let undated = create(&service, &json!({"title": "Undated"})).await;
    let past = create(&service, &json!({"title": "Late", "date": "20000101"})).await;

    for id in [undated, past] {
        let task = TestRequest::get(&task_path(&id)).send(&service).await.json();
        assert_eq!(task["date"], json!(today()));
    }
}

/// ## Summary
/// Test that invalid fields are rejected with 400 and nothing is stored.
#[test_log::test(tokio::test)]
async fn create_rejects_invalid_fields() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    for body in [
        json!({"date": "20990101"}),
        json!({"title": "   "}),
        json!({"title": "x", "date": "01.01.2099"}),
        json!({"title": "x", "repeat": "d 401"}),
        json!({"title": "x", "repeat": "m 31 2"}),
    ] {
        TestRequest::post("/api/task")
            .json_body(&body)
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_body_contains("\"error\"");
    }

    TestRequest::post("/api/task")
        .body("{not json")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_body_contains("Invalid request body");

    assert_eq!(test_db.count_tasks().await.expect("count"), 0);
}

// ============================================================================
// Read, update, delete
// ============================================================================

/// ## Summary
/// Test that malformed ids are 400 and unknown ids are 404.
#[test_log::test(tokio::test)]
async fn task_ids_are_validated() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    TestRequest::get("/api/task")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    TestRequest::get(&task_path("abc"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    TestRequest::get(&task_path(404))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_contains("\"error\"");
    TestRequest::delete(&task_path(404))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::post("/api/task/done?id=404")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Test that PUT replaces every field and returns the stored task.
#[test_log::test(tokio::test)]
async fn update_replaces_all_fields() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let id = test_db
        .seed_task("20990101", "Old", "old comment", "d 3")
        .await
        .expect("Failed to seed task");

    let updated = TestRequest::put("/api/task")
        .json_body(&json!({
            "id": id.to_string(),
            "date": "20200202",
            "title": "New",
            "comment": "",
            "repeat": "",
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["id"], json!(id.to_string()));
    assert_eq!(updated["date"], json!("20200202"));

    let stored = TestRequest::get(&task_path(id)).send(&service).await.json();
    assert_eq!(stored, updated);

    TestRequest::put("/api/task")
        .json_body(&json!({"id": id, "date": "", "title": "New"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    TestRequest::put("/api/task")
        .json_body(&json!({"date": "20990101", "title": "New"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    TestRequest::put("/api/task")
        .json_body(&json!({"id": "999", "date": "20990101", "title": "New"}))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Test that DELETE removes the task and answers with an empty object.
#[test_log::test(tokio::test)]
async fn delete_removes_task() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let id = test_db
        .seed_task("20990101", "Gone soon", "", "")
        .await
        .expect("Failed to seed task");

    let body = TestRequest::delete(&task_path(id))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body, json!({}));
    assert_eq!(test_db.count_tasks().await.expect("count"), 0);
}

// ============================================================================
// Done
// ============================================================================

/// ## Summary
/// Test that completing a one-off task deletes it.
#[test_log::test(tokio::test)]
async fn done_deletes_one_off_task() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let id = test_db
        .seed_task("20990101", "Once", "", "")
        .await
        .expect("Failed to seed task");

    let body = TestRequest::post(&format!("/api/task/done?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body, json!({}));

    TestRequest::get(&task_path(id))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Test that completing a recurring task moves it to the next occurrence.
#[test_log::test(tokio::test)]
async fn done_reschedules_recurring_task() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let yearly = test_db
        .seed_task("20990101", "Anniversary", "", "y")
        .await
        .expect("Failed to seed task");
    let every_third = test_db
        .seed_task("20990101", "Water plants", "", "d 3")
        .await
        .expect("Failed to seed task");

    for id in [yearly, every_third] {
        TestRequest::post(&format!("/api/task/done?id={id}"))
            .send(&service)
            .await
            .assert_status(StatusCode::OK);
    }

    let yearly = TestRequest::get(&task_path(yearly)).send(&service).await.json();
    assert_eq!(yearly["date"], json!("21000101"));

    let every_third = TestRequest::get(&task_path(every_third)).send(&service).await.json();
    assert_eq!(every_third["date"], json!("20990104"));
}

/// ## Summary
/// Test that a stored rule that can never fire is reported, and the task is kept.
#[test_log::test(tokio::test)]
async fn done_with_impossible_rule_is_bad_request() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let id = test_db
        .seed_task("20990101", "Never", "", "m 31 2")
        .await
        .expect("Failed to seed task");

    TestRequest::post(&format!("/api/task/done?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(test_db.count_tasks().await.expect("count"), 1);
}

// ============================================================================
// List and search
// ============================================================================

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["tasks"]
        .as_array()
        .expect("tasks should be an array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_string())
        .collect()
}

/// ## Summary
/// Test that an empty list is `[]`, never `null`.
#[test_log::test(tokio::test)]
async fn empty_list_is_an_array() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let body = TestRequest::get("/api/tasks")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body, json!({"tasks": []}));
}

/// ## Summary
/// Test ordering, the configured limit, and both search modes.
#[test_log::test(tokio::test)]
async fn list_orders_limits_and_searches() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    for (date, title, comment) in [
        ("20990301", "Dentist", ""),
        ("20990201", "Groceries", "milk"),
        ("20990201", "Call", "dentist bill"),
        ("20990215", "Taxes", ""),
        ("20990401", "April", ""),
        ("20990501", "May", ""),
        ("20990601", "June", ""),
    ] {
        test_db
            .seed_task(date, title, comment, "")
            .await
            .expect("Failed to seed task");
    }

    // the test settings cap listings at five rows
    let all = TestRequest::get("/api/tasks").send(&service).await.json();
    assert_eq!(titles(&all), ["Groceries", "Call", "Taxes", "Dentist", "April"]);
    assert!(all["tasks"][0]["id"].is_string());

    let on_date = TestRequest::get("/api/tasks?search=01.02.2099")
        .send(&service)
        .await
        .json();
    assert_eq!(titles(&on_date), ["Groceries", "Call"]);

    let text = TestRequest::get("/api/tasks?search=DENTIST")
        .send(&service)
        .await
        .json();
    assert_eq!(titles(&text), ["Call", "Dentist"]);

    let none = TestRequest::get("/api/tasks?search=31.02.2099")
        .send(&service)
        .await
        .json();
    assert_eq!(none, json!({"tasks": []}));
}
