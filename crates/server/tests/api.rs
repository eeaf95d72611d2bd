use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, PartnerAccounts, Seed};

async fn test_app() -> Router {
    test_app_with(
        PartnerAccounts::new()
            .with(1, "APORTE EDUARDO PAIM", "RETIRADAS EDUARDO PAIM")
            .with(2, "APORTE ROBERTO PAIM", "RETIRADAS ROBERTO PAIM"),
    )
    .await
}

async fn test_app_with(accounts: PartnerAccounts) -> Router {
    let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .partner_accounts(accounts)
        .build()
        .await
        .unwrap();
    engine.seed(&Seed::embedded().unwrap()).await.unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// (conta id, categoria id) of a categoria, looked up through the API.
async fn categoria_ids(app: &Router, natureza: &str, conta: &str, categoria: &str) -> (i64, i64) {
    let (status, contas) = get(app, &format!("/api/naturezas/{natureza}/contas")).await;
    assert_eq!(status, StatusCode::OK);
    let conta_id = contas
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == conta)
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (_, categorias) = get(app, &format!("/api/contas/{conta_id}/categorias")).await;
    let categoria_id = categorias
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == categoria)
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    (conta_id, categoria_id)
}

#[tokio::test]
async fn lists_seeded_taxonomy() {
    let app = test_app().await;
    let (status, naturezas) = get(&app, "/api/naturezas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(naturezas.as_array().unwrap().len(), 4);

    let (status, _) = get(&app, "/api/naturezas/XX/contas").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, centros) = get(&app, "/api/centros").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        centros
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["name"] == "Soja")
    );
}

#[tokio::test]
async fn creates_centro_once() {
    let app = test_app().await;
    let body = json!({"name": "Arroz", "area_hundredths": 25_000});
    let (status, centro) = send(&app, Method::POST, "/api/centros", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(centro["area_hundredths"], 25_000);

    let (status, error) = send(&app, Method::POST, "/api/centros", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn entry_lifecycle() {
    let app = test_app().await;
    let (conta_id, categoria_id) = categoria_ids(
        &app,
        "RNO",
        "RECEITAS NÃO OPERACIONAIS",
        "JUROS E CORREÇÕES",
    )
    .await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/lancamentos",
        Some(json!({
            "date": "2024-05-10",
            "natureza_code": "RNO",
            "conta_id": conta_id,
            "categoria_id": categoria_id,
            "amount_minor": 15_000,
            "description": "juros",
            "dre": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["dre"], true);
    assert_eq!(created["ir_eduardo"], false);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/lancamentos/{id}"),
        Some(json!({"description": null, "ir_roberto": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["dre"], true);
    assert_eq!(updated["ir_roberto"], true);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/lancamentos/{id}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, flagged) = get(&app, "/api/lancamentos?flag=ir_roberto").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flagged.as_array().unwrap().len(), 1);

    let (status, _) = get(&app, "/api/lancamentos?flag=bogus").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/lancamentos/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/lancamentos/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_entry_with_mismatched_conta() {
    let app = test_app().await;
    let (conta_id, _) = categoria_ids(
        &app,
        "RNO",
        "RECEITAS NÃO OPERACIONAIS",
        "OUTROS",
    )
    .await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/lancamentos",
        Some(json!({
            "date": "2024-05-10",
            "natureza_code": "DO",
            "conta_id": conta_id,
            "amount_minor": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn summary_totals() {
    let app = test_app().await;
    for (date, natureza, amount) in [
        ("2024-01-10", "RO", 30_000),
        ("2024-01-11", "DO", 10_000),
        ("2023-06-01", "DO", 99_999),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/lancamentos",
            Some(json!({"date": date, "natureza_code": natureza, "amount_minor": amount})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = get(&app, "/api/summary?start_date=2024-01-01&end_date=2024-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totals"]["income_minor"], 30_000);
    assert_eq!(summary["totals"]["expense_minor"], 10_000);
    assert_eq!(summary["totals"]["result_minor"], 20_000);
    assert_eq!(summary["totals"]["percent"], 100.0);
    assert_eq!(summary["by_natureza"][0]["key"], "RO");
    assert_eq!(summary["by_natureza"][0]["label"], "RECEITAS OPERACIONAIS");

    let (status, _) = get(&app, "/api/summary?start_date=2024-12-31&end_date=2024-01-01").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn partner_statement() {
    let app = test_app().await;
    let (conta_id, categoria_id) = categoria_ids(
        &app,
        "RNO",
        "RECEITAS NÃO OPERACIONAIS",
        "APORTE EDUARDO PAIM",
    )
    .await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/lancamentos",
        Some(json!({
            "date": "2024-01-15",
            "natureza_code": "RNO",
            "conta_id": conta_id,
            "categoria_id": categoria_id,
            "amount_minor": 50_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, socios) = get(&app, "/api/socios").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(socios[0]["name"], "Eduardo Paim");
    let eduardo = socios[0]["id"].as_i64().unwrap();

    let (status, statement) = get(
        &app,
        &format!("/api/socios/{eduardo}/extrato?start=2024-01&end=2024-12"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(statement["partner_name"], "Eduardo Paim");
    assert_eq!(statement["period"]["start"], "2024-01-01");
    assert_eq!(statement["period"]["end"], "2024-12-31");
    assert_eq!(
        statement["statement"],
        json!([{
            "month": "2024-01",
            "inflow_minor": 50_000,
            "outflow_minor": 0,
            "balance_after_minor": 50_000
        }])
    );

    let (status, partner) = send(
        &app,
        Method::PUT,
        &format!("/api/socios/{eduardo}/saldo_inicial"),
        Some(json!({"initial_balance_minor": 1_000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(partner["initial_balance_minor"], 1_000);

    let (status, _) = get(
        &app,
        &format!("/api/socios/{eduardo}/extrato?start=2024-12-01&end=2024-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(&app, "/api/socios/999/extrato").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partner_statement_without_bounds() {
    let app = test_app().await;
    let (conta_id, categoria_id) = categoria_ids(
        &app,
        "DNO",
        "RETIRADAS DE SÓCIOS",
        "RETIRADAS ROBERTO PAIM",
    )
    .await;
    for (date, amount) in [("2019-07-03", 500), ("2024-02-10", 250)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/lancamentos",
            Some(json!({
                "date": date,
                "natureza_code": "DNO",
                "conta_id": conta_id,
                "categoria_id": categoria_id,
                "amount_minor": amount
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, statement) = get(&app, "/api/socios/2/extrato").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(statement["partner_name"], "Roberto Paim");
    assert_eq!(statement["period"]["start"], "-262143-01-01");
    let lines = statement["statement"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["month"], "2019-07");
    assert_eq!(lines[0]["balance_after_minor"], -500);
    assert_eq!(lines[1]["month"], "2024-02");
    assert_eq!(lines[1]["balance_after_minor"], -750);
}

#[tokio::test]
async fn unmapped_partner_statement_is_unprocessable() {
    let app = test_app_with(PartnerAccounts::new().with(
        1,
        "APORTE EDUARDO PAIM",
        "RETIRADAS EDUARDO PAIM",
    ))
    .await;

    let (status, _) = get(&app, "/api/socios/1/extrato?start=2024-01&end=2024-12").await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = get(&app, "/api/socios/2/extrato?start=2024-01&end=2024-12").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error["error"],
        "Partner \"Roberto Paim\" has no capital account mapping"
    );
}

#[tokio::test]
async fn oversized_amount_is_unprocessable() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/lancamentos",
        Some(json!({"date": "2024-01-10", "natureza_code": "RO", "amount_minor": i64::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
