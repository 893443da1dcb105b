mod common;

use axum::http::StatusCode;
use common::{sequence_app, test_app};
use product::service::code::RandomCodeGenerator;
use serde_json::{Value, json};
use std::sync::Arc;

fn code_suffix(code: &str, company: &str) -> u32 {
    code.strip_prefix(&format!("{company}_"))
        .unwrap_or_else(|| panic!("code {code} does not start with {company}_"))
        .parse()
        .expect("numeric suffix")
}

#[tokio::test]
async fn post_widget_for_acme() {
    let app = test_app(Arc::new(RandomCodeGenerator));

    let response = app
        .server
        .post("/acme")
        .json(&json!({"id": 1, "name": "Widget", "price": 9.99}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["price"], 9.99);
    assert!(code_suffix(body["code"].as_str().unwrap(), "acme") < 100);
}

#[tokio::test]
async fn random_codes_stay_in_range_for_any_company() {
    let app = test_app(Arc::new(RandomCodeGenerator));

    for company in ["acme", "globex", "initech", "umbrella-corp"] {
        let body: Value = app
            .server
            .post(&format!("/{company}"))
            .json(&json!({"name": "Thing"}))
            .await
            .json();
        assert!(code_suffix(body["code"].as_str().unwrap(), company) < 100);
    }
}

#[tokio::test]
async fn sequence_codes_count_per_company() {
    let app = sequence_app();

    let mut codes = Vec::new();
    for company in ["acme", "acme", "globex", "acme"] {
        let body: Value = app
            .server
            .post(&format!("/{company}"))
            .json(&json!({}))
            .await
            .json();
        codes.push(body["code"].as_str().unwrap().to_string());
    }

    assert_eq!(codes, ["acme_0", "acme_1", "globex_0", "acme_2"]);
}

#[tokio::test]
async fn omitted_fields_are_null_and_id_is_assigned() {
    let app = sequence_app();

    let response = app.server.post("/acme").json(&json!({})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], Value::Null);
    assert_eq!(body["price"], Value::Null);
    assert_eq!(body["code"], "acme_0");
}

#[tokio::test]
async fn assigned_ids_skip_past_explicit_ones() {
    let app = sequence_app();

    app.server
        .post("/acme")
        .json(&json!({"id": 1, "name": "Widget", "price": 9.99}))
        .await
        .assert_status_ok();

    let other = app.server.post("/globex").json(&json!({})).await;
    other.assert_status_ok();
    let other: Value = other.json();
    assert_eq!(other["id"], 2);
    assert_eq!(other["code"], "globex_0");

    let same = app.server.post("/acme").json(&json!({})).await;
    same.assert_status_ok();
    let same: Value = same.json();
    assert_eq!(same["id"], 3);

    assert_eq!(app.store.rows().len(), 3);
    assert_eq!(app.store.identity(), 3);
}

#[tokio::test]
async fn reposting_an_id_updates_the_row() {
    let app = sequence_app();

    app.server
        .post("/acme")
        .json(&json!({"id": 5, "name": "Widget", "price": 1.5}))
        .await
        .assert_status_ok();

    let second: Value = app
        .server
        .post("/acme")
        .json(&json!({"id": 5, "name": "Gadget", "price": 2.5}))
        .await
        .json();
    assert_eq!(second["id"], 5);
    assert_eq!(second["code"], "acme_1");

    let fetched: Value = app.server.get("/acme/5").await.json();
    assert_eq!(fetched["name"], "Gadget");
    assert_eq!(fetched["price"], 2.5);

    let all: Value = app.server.get("/acme").await.json();
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn id_owned_by_another_company_is_a_conflict() {
    let app = sequence_app();

    app.server
        .post("/acme")
        .json(&json!({"id": 7, "name": "Widget"}))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/globex")
        .json(&json!({"id": 7, "name": "Hijack"}))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");

    let rows = app.store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tenant, "acme");
    assert_eq!(rows[0].name.as_deref(), Some("Widget"));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let app = sequence_app();

    let response = app
        .server
        .post("/acme")
        .bytes("{\"name\": ".into())
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
    let body: Value = response.json();
    assert_eq!(body["status"], "error");

    let wrong_type = app
        .server
        .post("/acme")
        .json(&json!({"id": "one"}))
        .await;
    assert!(wrong_type.status_code().is_client_error());

    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn blank_company_is_rejected() {
    let app = sequence_app();

    let response = app.server.post("/%20").json(&json!({"name": "x"})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn padded_company_is_rejected_not_merged() {
    let app = sequence_app();

    for path in ["/%20acme", "/acme%20", "/%09acme"] {
        let response = app.server.post(path).json(&json!({"name": "x"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], "error");
    }
    assert!(app.store.rows().is_empty());

    let body: Value = app.server.post("/acme").json(&json!({})).await.json();
    assert_eq!(body["code"], "acme_0");
}

#[tokio::test]
async fn reads_are_scoped_to_the_company() {
    let app = sequence_app();

    app.server
        .post("/acme")
        .json(&json!({"id": 1, "name": "Widget"}))
        .await
        .assert_status_ok();

    app.server
        .get("/globex/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let globex: Value = app.server.get("/globex").await.json();
    assert_eq!(globex, json!([]));

    let acme: Value = app.server.get("/acme/1").await.json();
    assert_eq!(acme["code"], "acme_0");
}

#[tokio::test]
async fn simultaneous_requests_keep_their_own_company() {
    let app = sequence_app();

    for round in 0..20 {
        let acme = async {
            app.server
                .post("/acme")
                .json(&json!({"name": format!("acme-{round}")}))
                .await
        };
        let globex = async {
            app.server
                .post("/globex")
                .json(&json!({"name": format!("globex-{round}")}))
                .await
        };

        let (acme, globex) = tokio::join!(acme, globex);

        let acme: Value = acme.json();
        let globex: Value = globex.json();
        assert!(acme["code"].as_str().unwrap().starts_with("acme_"));
        assert!(globex["code"].as_str().unwrap().starts_with("globex_"));
    }

    for row in app.store.rows() {
        let name = row.name.as_deref().unwrap();
        assert!(name.starts_with(&row.tenant));
        assert!(row.code.starts_with(&format!("{}_", row.tenant)));
    }
}

#[tokio::test]
async fn metrics_report_handled_requests() {
    let app = sequence_app();

    app.server
        .post("/acme")
        .json(&json!({"name": "Widget"}))
        .await
        .assert_status_ok();

    let response = app.server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("product_command_service_requests_total"));
    assert!(text.contains("process_start_time_seconds"));
}

#[tokio::test]
async fn openapi_document_lists_company_routes() {
    let app = sequence_app();

    let doc: Value = app.server.get("/api-docs/openapi.json").await.json();
    assert!(doc["paths"].get("/{company}").is_some());
    assert!(doc["paths"].get("/{company}/{id}").is_some());
}
