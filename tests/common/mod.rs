use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use cluster_ca_refresh::telemetry;

pub const OK_BODY: &str = r#"{"server": "https://cluster-id.k8s.ondigitalocean.com","certificate_authority_data": "SGVsbG8sIHdvcmxkLg==","client_certificate_data": null,"client_key_data": null,"token": "token","expires_at": "2026-10-19T12:00:00Z"}"#;

pub const NOT_FOUND_BODY: &str =
    r#"{"id": "not_found", "message": "The resource you were accessing could not be found."}"#;

/// What the fake authority saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub cluster_id: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone, Default)]
pub struct AuthorityState {
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn credentials(
    State(state): State<AuthorityState>,
    Path(cluster_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        cluster_id: cluster_id.clone(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
    });

    match cluster_id.as_str() {
        "missing" => (StatusCode::NOT_FOUND, NOT_FOUND_BODY),
        "garbage" => (StatusCode::OK, "<html>bad gateway</html>"),
        _ => (StatusCode::OK, OK_BODY),
    }
}

/// Spawns a fake credentials authority on a random local port.
///
/// Returns an endpoint template pointing at it and the shared request log.
pub async fn spawn_authority() -> (String, AuthorityState) {
    telemetry::init_tracing();

    let state = AuthorityState::default();
    let app = Router::new()
        .route(
            "/v2/kubernetes/clusters/{cluster_id}/credentials",
            get(credentials),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("failed to run authority");
    });

    (
        format!("http://{addr}/v2/kubernetes/clusters/{{cluster_id}}/credentials"),
        state,
    )
}

/// An endpoint template for a local port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v2/kubernetes/clusters/{{cluster_id}}/credentials")
}
