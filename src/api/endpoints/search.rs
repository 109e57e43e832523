//! JSON search for other screens (appointment booking, referrals).
//!
//! Hits come back under the entity key, e.g. `{"patients": [...]}`.
//! Results are capped at one page; a blank query returns an empty list.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::AppContext;
use crate::models::{Doctor, Patient};
use crate::search::{search, SearchScope, PAGE_SIZE};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct PatientResults {
    pub patients: Vec<PatientHit>,
}

#[derive(Debug, Serialize)]
pub struct DoctorResults {
    pub doctors: Vec<DoctorHit>,
}

#[derive(Debug, Serialize)]
pub struct PatientHit {
    pub mrn: String,
    pub full_name: String,
    pub gender: String,
    pub age: Option<u32>,
    pub mobile_primary: String,
}

impl From<&Patient> for PatientHit {
    fn from(p: &Patient) -> Self {
        Self {
            mrn: p.mrn.clone(),
            full_name: p.personal.full_name.clone(),
            gender: p.personal.gender.to_string(),
            age: p.personal.age,
            mobile_primary: p.contact.mobile_primary.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorHit {
    pub id: String,
    pub full_name: String,
    pub registration_number: String,
    pub specialization: String,
    pub department: String,
    pub contact_primary: String,
    pub status: String,
}

impl From<&Doctor> for DoctorHit {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id.clone(),
            full_name: d.personal.full_name.clone(),
            registration_number: d.professional.registration_number.clone(),
            specialization: d.professional.specialization.clone(),
            department: d.employment.department.to_string(),
            contact_primary: d.personal.contact_primary.clone(),
            status: d.employment.status.to_string(),
        }
    }
}

/// `GET /api/patients/search?q=`
pub async fn patients(
    State(ctx): State<AppContext>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<PatientResults>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let rows = ctx.registry.patients.all()?;
    let hits = search(&rows, &query.q, SearchScope::Api)
        .into_iter()
        .take(PAGE_SIZE)
        .map(PatientHit::from)
        .collect();
    Ok(Json(PatientResults { patients: hits }))
}

/// `GET /api/doctors/search?q=`
pub async fn doctors(
    State(ctx): State<AppContext>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<DoctorResults>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let rows = ctx.registry.doctors.all()?;
    let hits = search(&rows, &query.q, SearchScope::Api)
        .into_iter()
        .take(PAGE_SIZE)
        .map(DoctorHit::from)
        .collect();
    Ok(Json(DoctorResults { doctors: hits }))
}
