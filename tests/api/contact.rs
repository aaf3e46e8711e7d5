use reqwest::StatusCode;

use serde_json::json;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{json_body, TestApp, OPERATOR};

#[tokio::test]
async fn contact_returns_success_for_valid_request() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        // Business copy and acknowledgment
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact(&json!({ "name": "Jo", "email": "jo@x.com", "message": "hi" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!(
        json!({ "success": true, "message": "Contact form submitted successfully." }),
        json_body(res).await
    );
}

#[tokio::test]
async fn contact_notifies_operator_then_requester() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .contact(&json!({
            "name": "Jo",
            "email": "jo@x.com",
            "phone": "082 123 4567",
            "subject": "Audit quote",
            "message": "hi",
        }))
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    let sent = app.sent_emails().await;
    assert_eq!(2, sent.len());

    assert_eq!(OPERATOR, sent[0]["To"]);
    assert_eq!("New Contact Submission: Audit quote", sent[0]["Subject"]);
    assert!(sent[0]["HtmlBody"].as_str().unwrap().contains("082 123 4567"));

    assert_eq!("jo@x.com", sent[1]["To"]);
    assert_eq!("Thank you for contacting Cyberlex", sent[1]["Subject"]);
}

#[tokio::test]
async fn contact_returns_bad_request_for_missing_data() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        ("missing name", json!({ "email": "jo@x.com", "message": "hi" })),
        ("missing email", json!({ "name": "Jo", "message": "hi" })),
        ("missing message", json!({ "name": "Jo", "email": "jo@x.com" })),
        ("empty name", json!({ "name": "", "email": "jo@x.com", "message": "hi" })),
        ("empty object", json!({})),
    ];

    for (desc, body) in test_cases {
        let res = app.contact(&body).await.expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );
        assert_eq!(
            json!({ "error": "Name, email, and message are required" }),
            json_body(res).await
        );
    }
}

#[tokio::test]
async fn contact_rejects_malformed_email() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for email in ["jo", "jo@x", "jo@@x.com", "jo @x.com", "@x.com"] {
        let res = app
            .contact(&json!({ "name": "Jo", "email": email, "message": "hi" }))
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::BAD_REQUEST, res.status(), "{} was accepted", email);
        assert_eq!(json!({ "error": "Invalid email address" }), json_body(res).await);
    }
}

#[tokio::test]
async fn contact_rejects_bodies_that_are_not_json_objects() {
    let app = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::POST, "contact")
        .header("Content-Type", "application/json")
        .body("{ name: Jo")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    assert_eq!(json!({ "error": "Invalid request body" }), json_body(res).await);

    let res = app
        .request(reqwest::Method::POST, "contact")
        .form(&[("name", "Jo"), ("email", "jo@x.com"), ("message", "hi")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let res = app
        .contact(&json!({ "name": "Jo", "email": "jo@x.com", "message": 42 }))
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}

#[tokio::test]
async fn contact_reports_relay_failure() {
    let app = TestApp::spawn().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        // The acknowledgment is never attempted
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact(&json!({ "name": "Jo", "email": "jo@x.com", "message": "hi" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    assert_eq!(json!({ "error": "Failed to send message" }), json_body(res).await);
}
