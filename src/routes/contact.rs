use std::convert::TryFrom;

use actix_web::{
    web,
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::{
    Company,
    ContactForm,
    ContactName,
    EmailAddress,
    Interest,
    MalformedInput,
    Message,
    NewContactForm,
    Phone,
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

#[derive(Deserialize)]
pub struct ContactFormRequest {
    name: String,
    email: String,
    company: Option<String>,
    phone: Option<String>,
    interest: String,
    message: String,
}

#[tracing::instrument(
    name = "submitting contact form",
    skip(request, store),
    fields(email = %request.email, interest = %request.interest)
)]
pub async fn submit_contact_form(
    request: web::Json<ContactFormRequest>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let contact_form = ContactForm::from(build_new_contact_form(request.into_inner())?);
    insert_record(store.get_ref(), Collection::ContactForms, &contact_form)
        .await
        .map_err(RouteError::internal("Failed to submit contact form"))?;
    tracing::info!("New contact form submission from {}", contact_form.email);
    Ok(HttpResponse::Ok().json(contact_form))
}

/// Validates every field and reports all failures at once.
#[tracing::instrument(name = "validating contact form", skip(request))]
fn build_new_contact_form(request: ContactFormRequest) -> Result<NewContactForm, RouteError> {
    let mut errors = Vec::new();
    let mut check = |field: &'static str, error: MalformedInput| {
        errors.push(FieldError::new(field, error));
    };

    let name = ContactName::try_from(request.name).map_err(|e| check("name", e)).ok();
    let email = EmailAddress::try_from(request.email)
        .map_err(|e| check("email", e))
        .ok();
    let company = Company::parse_optional(request.company)
        .map_err(|e| check("company", e))
        .ok();
    let phone = Phone::parse_optional(request.phone)
        .map_err(|e| check("phone", e))
        .ok();
    let interest = Interest::try_from(request.interest)
        .map_err(|e| check("interest", e))
        .ok();
    let message = Message::try_from(request.message)
        .map_err(|e| check("message", e))
        .ok();

    match (name, email, company, phone, interest, message) {
        (Some(name), Some(email), Some(company), Some(phone), Some(interest), Some(message)) => {
            Ok(NewContactForm {
                name,
                email,
                company,
                phone,
                interest,
                message,
            })
        }
        _ => {
            tracing::warn!("rejected contact form: {:?}", errors);
            Err(RouteError::Validation(errors))
        }
    }
}

#[tracing::instrument(name = "listing contact forms", skip(store))]
pub async fn get_contact_forms(
    pagination: web::Query<Pagination>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let contact_forms: Vec<ContactForm> = find_records(
        store.get_ref(),
        Collection::ContactForms,
        pagination.newest_first("created_at"),
    )
    .await
    .map_err(RouteError::internal("Failed to retrieve contact forms"))?;
    Ok(HttpResponse::Ok().json(contact_forms))
}

#[tracing::instrument(name = "fetching contact form", skip(store))]
pub async fn get_contact_form(
    id: web::Path<String>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, RouteError> {
    let contact_form: Option<ContactForm> = find_record(
        store.get_ref(),
        Collection::ContactForms,
        Filter::eq("id", id.into_inner()),
    )
    .await
    .map_err(RouteError::internal("Failed to retrieve contact form"))?;
    contact_form
        .map(|contact_form| HttpResponse::Ok().json(contact_form))
        .ok_or(RouteError::NotFound("Contact form not found"))
}
