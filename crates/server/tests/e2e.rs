use std::net::SocketAddr;

use axum::Router;
use configs::StorageConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, state::ServerState};

struct TestApp {
    base_url: String,
    data_dir: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated data dir per test run
    let data_dir = std::env::temp_dir().join(format!("cognicheck_e2e_{}", Uuid::new_v4()));
    let storage = StorageConfig { data_dir: data_dir.to_string_lossy().into_owned(), ..StorageConfig::default() };
    let state = ServerState::open(&storage).await?;

    let frontend = data_dir.join("frontend");
    let app: Router = routes::build_router(state, CorsLayer::very_permissive(), &frontend.to_string_lossy());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_user_crud_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/users", app.base_url))
        .json(&json!({
            "name": "Jane Doe", "sex": "female", "month": "June", "day": "4",
            "year": "1950", "countryCode": "+1", "phone": "5551234"
        }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let res = c.patch(format!("{}/api/users/{}", app.base_url, id))
        .json(&json!({"frequency": "Monthly", "receivingCalls": false}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let patched = res.json::<Value>().await?;
    assert_eq!(patched["frequency"], "Monthly");
    assert_eq!(patched["receivingCalls"], false);
    assert_eq!(patched["phone"], "5551234");

    let res = c.delete(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, patched);

    let res = c.delete(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let listed = c.get(format!("{}/api/users", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(listed, json!([]));

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_lead_submissions_all_land() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..10 {
        let c = c.clone();
        let url = format!("{}/api/responses", app.base_url);
        handles.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({"name": format!("Lead {i}"), "phone": "555", "email": "l@example.com", "occupation": "Nurse"}))
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    for h in handles {
        assert_eq!(h.await??, HttpStatusCode::CREATED);
    }

    let listed = c.get(format!("{}/api/leads", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(listed.as_array().map(|a| a.len()), Some(10));

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}
