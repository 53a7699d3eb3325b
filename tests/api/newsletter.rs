use serde_json::json;

use crate::api::helpers::*;

#[actix_rt::test]
async fn subscribe_returns_the_stored_subscription() {
    let test_app = spawn_app().await;

    let response = send_json_post_request(
        &test_app.endpoint("/newsletter"),
        &json!({"email": "ursula_le_guin@gmail.com"}),
    )
    .await;

    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;
    assert_eq!(body["email"], "ursula_le_guin@gmail.com");
    assert!(body["id"].is_string());
    assert!(body["subscribed_at"].is_string());
}

#[actix_rt::test]
async fn subscribing_twice_returns_a_400() {
    let test_app = spawn_app().await;
    let body = json!({"email": "ursula_le_guin@gmail.com"});

    let first = send_json_post_request(&test_app.endpoint("/newsletter"), &body).await;
    let second = send_json_post_request(&test_app.endpoint("/newsletter"), &body).await;

    assert_eq!(200, first.status().as_u16());
    assert_eq!(400, second.status().as_u16());
    assert_eq!(
        json_body(second).await,
        json!({"detail": "Email already subscribed"})
    );
}

#[actix_rt::test]
async fn email_domain_case_does_not_bypass_uniqueness() {
    let test_app = spawn_app().await;

    send_json_post_request(
        &test_app.endpoint("/newsletter"),
        &json!({"email": "ursula@gmail.com"}),
    )
    .await;
    let response = send_json_post_request(
        &test_app.endpoint("/newsletter"),
        &json!({"email": " ursula@GMAIL.COM "}),
    )
    .await;

    assert_eq!(400, response.status().as_u16());
}

#[actix_rt::test]
async fn concurrent_duplicate_subscriptions_store_one_record() {
    let test_app = spawn_app().await;
    let endpoint = test_app.endpoint("/newsletter");
    let body = json!({"email": "race@gmail.com"});

    let (first, second) = tokio::join!(
        send_json_post_request(&endpoint, &body),
        send_json_post_request(&endpoint, &body)
    );

    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![200, 400]);

    let listed = json_body(send_get_request(&endpoint).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn subscribe_returns_a_422_with_invalid_email() {
    let test_app = spawn_app().await;
    let invalid_bodies = vec![
        (json!({}), "missing email"),
        (json!({"email": ""}), "empty email"),
        (json!({"email": "definitely-not-an-email"}), "malformed email"),
    ];
    for (body, error_message) in invalid_bodies {
        let response = send_json_post_request(&test_app.endpoint("/newsletter"), &body).await;
        assert_eq!(
            422,
            response.status().as_u16(),
            "Subscription with {} did not fail",
            error_message
        );
    }
}

#[actix_rt::test]
async fn subscriptions_are_listed_newest_first() {
    let test_app = spawn_app().await;
    for email in ["a@gmail.com", "b@gmail.com", "c@gmail.com"] {
        send_json_post_request(&test_app.endpoint("/newsletter"), &json!({ "email": email }))
            .await;
    }

    let listed =
        json_body(send_get_request(&test_app.endpoint("/newsletter?limit=2")).await).await;
    let listed = listed.as_array().unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed[0]["subscribed_at"].as_str() >= listed[1]["subscribed_at"].as_str());
}

#[actix_rt::test]
async fn storage_failures_return_a_500() {
    let test_app = spawn_app_with_broken_store().await;

    let response = send_json_post_request(
        &test_app.endpoint("/newsletter"),
        &json!({"email": "ursula@gmail.com"}),
    )
    .await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(
        json_body(response).await["detail"],
        "Failed to subscribe to newsletter"
    );
}
