//! Next-date endpoint integration tests.
//!
//! The case table is shared with the evaluator's own tests so both layers agree.

use salvo::http::StatusCode;

use super::helpers::*;

mod cases {
    #![allow(dead_code)]

    include!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tickler-rule/tests/next_date_cases/mod.rs"
    ));
}

fn encode(value: &str) -> String {
    value.replace(' ', "%20").replace(',', "%2C")
}

/// ## Summary
/// Test that the endpoint answers every shared case the way the evaluator does.
#[test_log::test(tokio::test)]
async fn endpoint_matches_evaluator_cases() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    for case in cases::next_date_cases() {
        let path = format!(
            "/api/nextdate?now={}&date={}&repeat={}",
            case.now,
            encode(case.date),
            encode(case.repeat)
        );
        let response = TestRequest::get(&path).send(&service).await;

        match case.expected {
            cases::Expected::Date(expected) => {
                assert_eq!(response.status, StatusCode::OK, "Case {}", case.name);
                assert_eq!(response.body_string(), expected, "Case {}", case.name);
            }
            cases::Expected::InvalidDate
            | cases::Expected::InvalidRule
            | cases::Expected::Exhausted => {
                assert_eq!(response.status, StatusCode::BAD_REQUEST, "Case {}", case.name);
                assert!(!response.body_string().is_empty(), "Case {}", case.name);
            }
        }
    }
}

/// ## Summary
/// Test that a missing, empty or malformed `now` is rejected.
#[test_log::test(tokio::test)]
async fn now_is_required() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    TestRequest::get("/api/nextdate?date=20990101&repeat=y")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::get("/api/nextdate?now=&date=20990101&repeat=y")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::get("/api/nextdate?now=2024-01-26&date=20240101&repeat=y")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Test that the answer is plain text.
#[test_log::test(tokio::test)]
async fn answer_is_plain_text() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_test_service(&test_db);

    let response = TestRequest::get("/api/nextdate?now=20240126&date=20240126&repeat=w%207")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Content-Type", "text/plain");
    assert_eq!(response.body_string(), "20240128");
}
