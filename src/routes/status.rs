use actix_web::{
    web,
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::StatusCheck;
use crate::routes::RouteError;
use crate::store::{
    find_records,
    insert_record,
    Collection,
    DocumentStore,
    FindOptions,
    MAX_SCAN_LIMIT,
};

#[derive(Deserialize)]
pub struct StatusCheckRequest {
    client_name: String,
}

#[tracing::instrument(
    name = "recording status check",
    skip(request, store),
    fields(client_name = %request.client_name)
)]
pub async fn create_status_check(
    request: web::Json<StatusCheckRequest>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let status_check = StatusCheck::new(request.into_inner().client_name);
    insert_record(store.get_ref(), Collection::StatusChecks, &status_check)
        .await
        .map_err(RouteError::internal("Failed to create status check"))?;
    Ok(HttpResponse::Ok().json(status_check))
}

#[tracing::instrument(name = "listing status checks", skip(store))]
pub async fn get_status_checks(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let status_checks: Vec<StatusCheck> = find_records(
        store.get_ref(),
        Collection::StatusChecks,
        FindOptions::new(MAX_SCAN_LIMIT),
    )
    .await
    .map_err(RouteError::internal("Failed to retrieve status checks"))?;
    Ok(HttpResponse::Ok().json(status_checks))
}
