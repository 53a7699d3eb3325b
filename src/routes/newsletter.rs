use std::convert::TryFrom;

use actix_web::{
    web,
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::{
    EmailAddress,
    Newsletter,
};
use crate::routes::{
    FieldError,
    Pagination,
    RouteError,
};
use crate::store::{
    find_record,
    find_records,
    insert_record,
    Collection,
    DocumentStore,
    Filter,
};

const ALREADY_SUBSCRIBED: &str = "Email already subscribed";

#[derive(Deserialize)]
pub struct NewsletterRequest {
    email: String,
}

/// Subscribe an email address.
///
/// The lookup before the insert gives the common case a clean answer; two
/// concurrent requests for the same address can both pass it, and the
/// store's unique index on `email` turns the loser into the same conflict.
#[tracing::instrument(
    name = "subscribing to newsletter",
    skip(request, store),
    fields(email = %request.email)
)]
pub async fn subscribe_newsletter(
    request: web::Json<NewsletterRequest>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let email = EmailAddress::try_from(request.into_inner().email)
        .map_err(|e| RouteError::Validation(vec![FieldError::new("email", e)]))?;

    let existing: Option<Newsletter> = find_record(
        store.get_ref(),
        Collection::Newsletters,
        Filter::eq("email", email.as_ref()),
    )
    .await
    .map_err(RouteError::internal("Failed to subscribe to newsletter"))?;
    if existing.is_some() {
        return Err(RouteError::Conflict(ALREADY_SUBSCRIBED));
    }

    let newsletter = Newsletter::new(email);
    match insert_record(store.get_ref(), Collection::Newsletters, &newsletter).await {
        Ok(()) => {}
        Err(e) if e.is_duplicate_key() => return Err(RouteError::Conflict(ALREADY_SUBSCRIBED)),
        Err(e) => return Err(RouteError::internal("Failed to subscribe to newsletter")(e)),
    }

    tracing::info!("New newsletter subscription: {}", newsletter.email);
    Ok(HttpResponse::Ok().json(newsletter))
}

#[tracing::instrument(name = "listing newsletter subscriptions", skip(store))]
pub async fn get_newsletter_subscriptions(
    pagination: web::Query<Pagination>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let subscriptions: Vec<Newsletter> = find_records(
        store.get_ref(),
        Collection::Newsletters,
        pagination.newest_first("subscribed_at"),
    )
    .await
    .map_err(RouteError::internal("Failed to retrieve newsletter subscriptions"))?;
    Ok(HttpResponse::Ok().json(subscriptions))
}
