use actix_web::{
    web,
    HttpResponse,
};
use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use serde_json::json;

use crate::domain::{
    iso8601,
    ServiceName,
};

#[derive(Serialize)]
struct HealthReport<'a> {
    status: &'static str,
    #[serde(with = "iso8601")]
    timestamp: DateTime<Utc>,
    service: &'a str,
}

/// Liveness probe. It does not touch the store, so it always succeeds.
pub async fn health_check(service_name: web::Data<ServiceName>) -> HttpResponse {
    HttpResponse::Ok().json(HealthReport {
        status: "healthy",
        timestamp: iso8601::now(),
        service: &service_name.0,
    })
}

pub async fn root(service_name: web::Data<ServiceName>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("{} - Powering Crypto Payments", service_name.0)
    }))
}
