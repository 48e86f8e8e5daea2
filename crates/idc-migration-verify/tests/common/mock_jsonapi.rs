//! Mock JSON:API server
//!
//! Serves `GET /jsonapi/{entity}/{bundle}?filter[{field}]={value}` from a
//! fixed resource list. `id` filters on the resource UUID, anything else on
//! the string attribute of that name. A filter that matches nothing answers
//! 200 with empty `data`, like the real platform.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use idc_migration_verify::config::bundled_fixture_dir;
use idc_migration_verify::{VerifyConfig, VerifyContext};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Resources = Arc<Vec<Value>>;

/// A running mock server; stopped on drop
pub struct MockJsonApi {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockJsonApi {
    /// Serve `resources` on an ephemeral local port
    pub async fn start(resources: Vec<Value>) -> Self {
        let app = Router::new()
            .route("/jsonapi", get(root))
            .route("/jsonapi/:entity/:bundle", get(collection))
            .with_state(Arc::new(resources));
        Self::serve(app).await
    }

    /// Answer every collection request with 200 and `body`, verbatim
    pub async fn start_with_body(body: &'static str) -> Self {
        let app = Router::new()
            .route("/jsonapi", get(root))
            .route("/jsonapi/:entity/:bundle", get(move || async move { body }));
        Self::serve(app).await
    }

    async fn serve(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Config pointing at this server and the bundled fixtures
    pub fn config(&self) -> VerifyConfig {
        VerifyConfig::from_env()
            .with_base_url(&self.base_url)
            .with_fixture_dir(bundled_fixture_dir())
    }

    /// Context pointing at this server and the bundled fixtures
    pub fn context(&self) -> VerifyContext {
        VerifyContext::new(&self.config()).expect("Failed to build verify context")
    }
}

impl Drop for MockJsonApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "jsonapi": { "version": "1.0" },
        "data": [],
        "links": {}
    }))
}

async fn collection(
    State(resources): State<Resources>,
    Path((entity, bundle)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let filter = params.iter().find_map(|(key, value)| {
        key.strip_prefix("filter[")
            .and_then(|k| k.strip_suffix(']'))
            .map(|field| (field.to_string(), value.clone()))
    });
    let Some((field, value)) = filter else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "status": "400", "title": "Bad Request" }] })),
        );
    };

    let type_id = format!("{entity}--{bundle}");
    let data: Vec<Value> = resources
        .iter()
        .filter(|r| r["type"] == type_id)
        .filter(|r| match field.as_str() {
            "id" => r["id"] == value,
            attribute => r["attributes"][attribute] == value,
        })
        .cloned()
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "jsonapi": { "version": "1.0" },
            "data": data,
            "links": { "self": { "href": format!("/jsonapi/{entity}/{bundle}") } }
        })),
    )
}
