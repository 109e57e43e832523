//! HTML pages for patients and doctors.
//!
//! Handlers are generic over the record type; the router instantiates
//! them once per entity.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::api::error::PageError;
use crate::api::types::AppContext;
use crate::models::FieldMap;
use crate::registration::{RegistryError, SaveAction};
use crate::search::{paginate, search, SearchScope, PAGE_SIZE};
use crate::views::{
    edit_page, list_page, query_string, registration_page, EditPage, ListPage, RecordView,
    RegistrationPage,
};

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub search: Option<String>,
    pub selected_id: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    pub page: Option<usize>,
}

/// `GET /` and `GET /doctors`: registration form, search and preview.
///
/// The preview's record prefills the form.
pub async fn home<E: RecordView>(
    State(ctx): State<AppContext>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, PageError> {
    let table = E::table(&ctx.registry);
    let rows = table.all()?;
    let results = match &query.search {
        Some(q) => search(&rows, q, SearchScope::Registration),
        None => Vec::new(),
    };

    let selected = match query.selected_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(
            rows.iter()
                .find(|r| r.id() == id)
                .ok_or_else(|| PageError::NotFound(id.to_string()))?,
        ),
        _ => None,
    };

    let values = selected
        .map(|record| record.prefill(ctx.today()))
        .unwrap_or_default();

    Ok(Html(registration_page::<E>(&RegistrationPage {
        values: &values,
        error: None,
        flash: query.success.as_deref(),
        search: query.search.as_deref(),
        results: &results,
        selected,
    })))
}

/// `POST /patients` and `POST /doctors`: register a new record.
pub async fn create<E: RecordView>(
    State(ctx): State<AppContext>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, PageError> {
    let values = FieldMap::from(values);
    match E::register(&ctx.registry, &values, ctx.today()) {
        Ok(record) => {
            let message = record.saved_message(SaveAction::Created);
            Ok(redirect_home::<E>(&[("success", message.as_str())]))
        }
        Err(RegistryError::Validation(err)) => {
            let html = registration_page::<E>(&RegistrationPage {
                values: &values,
                error: Some(&err),
                flash: None,
                search: None,
                results: &[],
                selected: None,
            });
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// `GET /patients/:id/edit`: edit form prefilled from the stored row.
pub async fn edit_form<E: RecordView>(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let record = E::table(&ctx.registry)
        .get(&id)?
        .ok_or_else(|| PageError::NotFound(id.clone()))?;
    let values = record.prefill(ctx.today());
    Ok(Html(edit_page::<E>(&EditPage {
        id: &id,
        values: &values,
        error: None,
    })))
}

/// `POST /patients/:id/edit`: save an edit. The path decides the identifier.
pub async fn update<E: RecordView>(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, PageError> {
    let values = FieldMap::from(values);
    match E::edit(&ctx.registry, &id, &values, ctx.today()) {
        Ok(record) => {
            let message = record.saved_message(SaveAction::Updated);
            Ok(redirect_home::<E>(&[
                ("success", message.as_str()),
                ("selected_id", record.id()),
            ]))
        }
        Err(RegistryError::Validation(err)) => {
            let html = edit_page::<E>(&EditPage {
                id: &id,
                values: &values,
                error: Some(&err),
            });
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(other) => Err(other.into()),
    }
}

/// `GET /patients/view-all`: filtered, paginated listing.
pub async fn view_all<E: RecordView>(
    State(ctx): State<AppContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    let rows = E::table(&ctx.registry).all()?;
    let matches = search(&rows, &query.search, SearchScope::Directory);
    let page = paginate(matches, query.page.unwrap_or(1), PAGE_SIZE);
    Ok(Html(list_page::<E>(&ListPage {
        search: query.search.trim(),
        page: &page,
    })))
}

fn redirect_home<E: RecordView>(params: &[(&str, &str)]) -> Response {
    Redirect::to(&format!("{}?{}", E::HOME, query_string(params))).into_response()
}
