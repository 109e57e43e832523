//! Registry router.
//!
//! Returns a composable `Router` with the HTML pages at the root and the
//! JSON search under `/api/`. Every response is marked `no-store` since
//! pages carry patient data.

use axum::http::{header, HeaderValue};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints::{health, records, search};
use crate::api::middleware;
use crate::api::types::AppContext;
use crate::models::{Doctor, Patient};

/// Build the full router from a pre-constructed `AppContext`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn build_router(ctx: AppContext) -> Router {
    let pages = Router::new()
        // Patients
        .route("/", get(records::home::<Patient>))
        .route(
            "/patients",
            get(|| async { Redirect::to("/") }).post(records::create::<Patient>),
        )
        .route("/patients/view-all", get(records::view_all::<Patient>))
        .route(
            "/patients/:id/edit",
            get(records::edit_form::<Patient>).post(records::update::<Patient>),
        )
        // Doctors
        .route(
            "/doctors",
            get(records::home::<Doctor>).post(records::create::<Doctor>),
        )
        .route("/doctors/view-all", get(records::view_all::<Doctor>))
        .route(
            "/doctors/:id/edit",
            get(records::edit_form::<Doctor>).post(records::update::<Doctor>),
        );

    let api = Router::new()
        .route("/patients/search", get(search::patients))
        .route("/doctors/search", get(search::doctors));

    Router::new()
        .merge(pages)
        .nest("/api", api)
        .route("/health", get(health::check))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::access_log::log_request))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::store::Registry;

    fn test_app() -> (Router, AppContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(Registry::open(tmp.path()).unwrap());
        (build_router(ctx.clone()), ctx, tmp)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    const ASHA: &[(&str, &str)] = &[
        ("full_name", "Asha Rao"),
        ("gender", "Female"),
        ("dob", "2000-01-01"),
        ("mobile_primary", "9876543210"),
        ("billing_type", "Cash"),
        ("privacy_consent", "Yes"),
    ];

    const MEERA: &[(&str, &str)] = &[
        ("full_name", "Dr. Meera Iyer"),
        ("gender", "Female"),
        ("contact_primary", "9811111111"),
        ("qualification", "MD"),
        ("specialization", "Cardiology"),
        ("registration_number", "KMC-4411"),
        ("doctor_type", "Consultant"),
        ("department", "Cardiology"),
        ("status", "Active"),
    ];

    #[tokio::test]
    async fn health_is_ok_and_not_cached() {
        let (app, _ctx, _tmp) = test_app();
        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "no-store"
        );
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn registration_page_renders_form() {
        let (app, _ctx, _tmp) = test_app();
        let response = app.oneshot(get_req("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Patient Registration"));
        assert!(html.contains(r#"action="/patients""#));
    }

    #[tokio::test]
    async fn create_patient_redirects_with_flash() {
        let (app, ctx, _tmp) = test_app();
        let response = app.oneshot(post_form("/patients", ASHA)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("Location").unwrap().to_str().unwrap();
        assert!(location.starts_with("/?success=Patient+created"));

        let stored = ctx.registry.patients.get("P0001").unwrap().unwrap();
        assert_eq!(stored.personal.full_name, "Asha Rao");
        let expected_age = crate::forms::calculate_age(
            stored.personal.dob.unwrap(),
            ctx.today(),
        );
        assert_eq!(stored.personal.age, expected_age);
    }

    #[tokio::test]
    async fn invalid_patient_rerenders_form_with_tab() {
        let (app, ctx, _tmp) = test_app();
        let response = app
            .oneshot(post_form(
                "/patients",
                &[("full_name", "Asha Rao"), ("gender", "Female"), ("billing_type", "Cash")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("2. Contact Details"));
        assert!(html.contains("Mobile Number (Primary) is required."));
        // Submitted values survive the round trip.
        assert!(html.contains(r#"value="Asha Rao""#));
        assert!(ctx.registry.patients.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_finds_registered_patient() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();

        let response = app.oneshot(get_req("/?search=asha")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<td>P0001</td>"));
        assert!(!html.contains("No results"));
    }

    #[tokio::test]
    async fn unknown_doctor_registration_shows_no_results() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/doctors", MEERA)).await.unwrap();

        let response = app.oneshot(get_req("/doctors?search=UNKNOWN-999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No results"));
    }

    #[tokio::test]
    async fn preview_shows_selected_record() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/doctors", MEERA)).await.unwrap();

        let response = app
            .oneshot(get_req("/doctors?selected_id=D0001"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("D0001 Dr. Meera Iyer"));
        assert!(html.contains("KMC-4411"));
    }

    #[tokio::test]
    async fn selected_record_prefills_registration_form() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();

        let blank = body_text(app.clone().oneshot(get_req("/")).await.unwrap()).await;
        assert!(blank.contains(r#"name="full_name" value="""#));

        let response = app.oneshot(get_req("/?selected_id=P0001")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"name="full_name" value="Asha Rao""#));
        assert!(html.contains(r#"name="mobile_primary" value="9876543210""#));
        assert!(!html.contains(r#"name="full_name" value="""#));
    }

    #[tokio::test]
    async fn unknown_ids_are_404() {
        let (app, _ctx, _tmp) = test_app();
        for uri in ["/patients/P0404/edit", "/doctors/D0404/edit", "/?selected_id=P0404"] {
            let response = app.clone().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert!(body_text(response).await.contains("No such record"));
        }

        let response = app
            .oneshot(post_form("/patients/P0404/edit", ASHA))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();

        let response = app.oneshot(get_req("/patients/P0001/edit")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Edit Patient P0001"));
        assert!(html.contains(r#"value="9876543210""#));
        assert!(html.contains(r#"name="privacy_consent" value="Yes" checked"#));
    }

    #[tokio::test]
    async fn edit_keeps_identifier_and_updates_phone() {
        let (app, ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();
        let before = ctx.registry.patients.get("P0001").unwrap().unwrap();

        let mut edited: Vec<(&str, &str)> = ASHA
            .iter()
            .map(|&(k, v)| if k == "mobile_primary" { (k, "9000000001") } else { (k, v) })
            .collect();
        edited.push(("ID", "P0999"));
        let response = app
            .oneshot(post_form("/patients/P0001/edit", &edited))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("Location").unwrap().to_str().unwrap();
        assert!(location.contains("selected_id=P0001"));

        let all = ctx.registry.patients.all().unwrap();
        assert_eq!(all.len(), 1);
        let mut expected = before;
        expected.contact.mobile_primary = "9000000001".into();
        assert_eq!(all[0], expected);
    }

    #[tokio::test]
    async fn duplicate_doctor_registration_is_400() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/doctors", MEERA)).await.unwrap();
        let response = app.oneshot(post_form("/doctors", MEERA)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("already registered"));
    }

    #[tokio::test]
    async fn view_all_paginates() {
        let (app, _ctx, _tmp) = test_app();
        for _ in 0..25 {
            app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();
        }

        let html = body_text(app.clone().oneshot(get_req("/patients/view-all")).await.unwrap()).await;
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains("<td>P0020</td>"));
        assert!(!html.contains("<td>P0021</td>"));

        let html = body_text(
            app.oneshot(get_req("/patients/view-all?page=2"))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Page 2 of 2"));
        assert!(html.contains("<td>P0025</td>"));
    }

    #[tokio::test]
    async fn api_search_returns_json_hits() {
        let (app, _ctx, _tmp) = test_app();
        app.clone().oneshot(post_form("/doctors", MEERA)).await.unwrap();

        let response = app
            .clone()
            .oneshot(get_req("/api/doctors/search?q=cardio"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["doctors"].as_array().unwrap().len(), 1);
        assert_eq!(json["doctors"][0]["id"], "D0001");
        assert_eq!(json["doctors"][0]["registration_number"], "KMC-4411");

        let response = app.oneshot(get_req("/api/patients/search?q=")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json, serde_json::json!({ "patients": [] }));
    }

    #[tokio::test]
    async fn api_search_caps_results() {
        let (app, _ctx, _tmp) = test_app();
        for _ in 0..22 {
            app.clone().oneshot(post_form("/patients", ASHA)).await.unwrap();
        }
        let response = app.oneshot(get_req("/api/patients/search?q=asha")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["patients"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (app, _ctx, _tmp) = test_app();
        let response = app.oneshot(get_req("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
