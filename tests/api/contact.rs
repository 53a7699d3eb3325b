use serde_json::{
    json,
    Value,
};

use crate::api::helpers::*;

fn contact_form(name: &str) -> Value {
    json!({
        "name": name,
        "email": "ursula_le_guin@gmail.com",
        "company": "Earthsea Ltd",
        "interest": "payment gateway",
        "message": "We would like to accept crypto payments."
    })
}

#[actix_rt::test]
async fn submit_returns_the_stored_form() {
    let test_app = spawn_app().await;

    let response =
        send_json_post_request(&test_app.endpoint("/contact"), &contact_form("le guin")).await;

    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;
    assert!(body["id"].is_string());
    assert_eq!(body["name"], "le guin");
    assert_eq!(body["company"], "Earthsea Ltd");
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["status"], "new");
    assert!(body["created_at"].is_string());
}

#[actix_rt::test]
async fn submitted_form_is_listed_and_fetchable() {
    let test_app = spawn_app().await;
    let created = json_body(
        send_json_post_request(&test_app.endpoint("/contact"), &contact_form("ursula")).await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let listed = json_body(send_get_request(&test_app.endpoint("/contact")).await).await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|form| form["id"] == created["id"]));

    let response = send_get_request(&test_app.endpoint(&format!("/contact/{}", id))).await;
    assert_eq!(200, response.status().as_u16());
    assert_eq!(json_body(response).await, created);
}

#[actix_rt::test]
async fn unknown_contact_form_returns_a_404() {
    let test_app = spawn_app().await;

    let response = send_get_request(&test_app.endpoint("/contact/does-not-exist")).await;

    assert_eq!(404, response.status().as_u16());
    assert_eq!(
        json_body(response).await,
        json!({"detail": "Contact form not found"})
    );
}

#[actix_rt::test]
async fn list_is_newest_first_and_respects_skip_and_limit() {
    let test_app = spawn_app().await;
    for i in 0..5 {
        send_json_post_request(
            &test_app.endpoint("/contact"),
            &contact_form(&format!("sender {}", i)),
        )
        .await
        .error_for_status()
        .unwrap();
    }

    let all = json_body(send_get_request(&test_app.endpoint("/contact")).await).await;
    let all = all.as_array().unwrap().clone();
    assert_eq!(all.len(), 5);
    let created_at: Vec<&str> = all
        .iter()
        .map(|form| form["created_at"].as_str().unwrap())
        .collect();
    assert!(created_at.windows(2).all(|pair| pair[0] >= pair[1]));

    let page =
        json_body(send_get_request(&test_app.endpoint("/contact?skip=1&limit=2")).await).await;
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["id"], all[1]["id"]);
    assert_eq!(page[1]["id"], all[2]["id"]);

    let empty = json_body(send_get_request(&test_app.endpoint("/contact?skip=10")).await).await;
    assert!(empty.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn zero_limit_returns_an_empty_list() {
    let test_app = spawn_app().await;
    send_json_post_request(&test_app.endpoint("/contact"), &contact_form("ursula"))
        .await
        .error_for_status()
        .unwrap();

    let response = send_get_request(&test_app.endpoint("/contact?limit=0")).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(json_body(response).await, json!([]));
}

#[actix_rt::test]
async fn largest_skip_returns_an_empty_list() {
    let test_app = spawn_app().await;
    send_json_post_request(&test_app.endpoint("/contact"), &contact_form("ursula"))
        .await
        .error_for_status()
        .unwrap();

    let response = send_get_request(
        &test_app.endpoint(&format!("/contact?skip={}", u64::MAX)),
    )
    .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(json_body(response).await, json!([]));
}

#[actix_rt::test]
async fn invalid_pagination_returns_a_422() {
    let test_app = spawn_app().await;
    for query in ["skip=-1", "limit=-5", "limit=lots"] {
        let response = send_get_request(&test_app.endpoint(&format!("/contact?{}", query))).await;
        assert_eq!(
            422,
            response.status().as_u16(),
            "query {} did not fail",
            query
        );
    }
}

#[actix_rt::test]
async fn submit_returns_a_422_with_missing_field() {
    let test_app = spawn_app().await;
    for field in ["name", "email", "interest", "message"] {
        let mut body = contact_form("ursula");
        body.as_object_mut().unwrap().remove(field);

        let response = send_json_post_request(&test_app.endpoint("/contact"), &body).await;

        assert_eq!(
            422,
            response.status().as_u16(),
            "Contact form without {} did not fail",
            field
        );
    }
}

#[actix_rt::test]
async fn submit_reports_every_invalid_field() {
    let test_app = spawn_app().await;
    let body = json!({
        "name": "   ",
        "email": "not-an-email",
        "phone": "1".repeat(51),
        "interest": "payments",
        "message": "hello"
    });

    let response = send_json_post_request(&test_app.endpoint("/contact"), &body).await;

    assert_eq!(422, response.status().as_u16());
    let detail = json_body(response).await["detail"].clone();
    let fields: Vec<&str> = detail
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "phone"]);
}

#[actix_rt::test]
async fn malformed_json_returns_a_422() {
    let test_app = spawn_app().await;

    let response =
        send_raw_post_request(&test_app.endpoint("/contact"), "{\"name\": ".to_string()).await;

    assert_eq!(422, response.status().as_u16());
}

#[actix_rt::test]
async fn storage_failures_return_a_500() {
    let test_app = spawn_app_with_broken_store().await;

    let response =
        send_json_post_request(&test_app.endpoint("/contact"), &contact_form("ursula")).await;
    assert_eq!(500, response.status().as_u16());
    assert_eq!(
        json_body(response).await["detail"],
        "Failed to submit contact form"
    );

    let response = send_get_request(&test_app.endpoint("/contact")).await;
    assert_eq!(500, response.status().as_u16());
    assert_eq!(
        json_body(response).await["detail"],
        "Failed to retrieve contact forms"
    );
}
