use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use goghflow::met::client::{BackoffPolicy, FetchError, JitterFn, MetClient};
use goghflow::types::MetObject;

fn zero_jitter() -> JitterFn {
    Box::new(|_| 0)
}

fn fast_policy() -> BackoffPolicy {
    BackoffPolicy {
        base_ms: 1,
        cap_ms: 5,
        jitter_ms: 0,
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> MetClient {
    MetClient::new(
        base.to_string(),
        "goghflow-test/0.0".to_string(),
        fast_policy(),
        zero_jitter(),
    )
}

/// A 403 followed by a 200 on retry must not surface past the client and
/// must yield the same parsed JSON as if the 200 arrived first.
#[tokio::test]
async fn test_throttle_then_success_is_transparent() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/objects/436535",
        get(move || {
            let h = h.clone();
            async move {
                if h.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::FORBIDDEN, "slow down").into_response()
                } else {
                    Json(json!({
                        "objectID": 436535,
                        "isPublicDomain": true,
                        "artistDisplayName": "Vincent van Gogh",
                        "primaryImageSmall": "https://images.example/436535.jpg"
                    }))
                    .into_response()
                }
            }
        }),
    );

    let base = serve(app).await;
    let client = client_for(&base);

    let obj: MetObject = client
        .fetch_json(&format!("{base}/objects/436535"), 3)
        .await
        .unwrap();

    assert_eq!(obj.object_id, 436535);
    assert!(obj.is_public_domain);
    assert_eq!(obj.artist_display_name.as_deref(), Some("Vincent van Gogh"));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_exhausted_retries_after_sustained_throttling() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/search",
        get(move || {
            let h = h.clone();
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                (StatusCode::TOO_MANY_REQUESTS, "throttled").into_response()
            }
        }),
    );

    let base = serve(app).await;
    let client = client_for(&base);

    let err = client
        .fetch_json::<serde_json::Value>(&format!("{base}/search"), 2)
        .await
        .unwrap_err();

    match err {
        FetchError::ExhaustedRetries { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected ExhaustedRetries, got {other:?}"),
    }
    // retries + 1 attempts total
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_non_throttle_failure_is_never_retried() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let app = Router::new().route(
        "/objects/1",
        get(move || {
            let h = h.clone();
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
            }
        }),
    );

    let base = serve(app).await;
    let client = client_for(&base);

    let err = client
        .fetch_json::<serde_json::Value>(&format!("{base}/objects/1"), 5)
        .await
        .unwrap_err();

    match err {
        FetchError::RequestFailed { status, .. } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_response_parses_missing_id_list() {
    // The upstream search endpoint returns {"objectIDs": null} for queries
    // with no hits; that must parse, not error.
    let app = Router::new().route(
        "/search",
        get(|| async { Json(json!({"total": 0, "objectIDs": null})) }),
    );

    let base = serve(app).await;
    let client = client_for(&base);

    let res: goghflow::types::SearchResponse = client
        .fetch_json(&format!("{base}/search"), 0)
        .await
        .unwrap();
    assert!(res.object_ids.is_none());
}
