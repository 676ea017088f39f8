//! End-to-end client tests against a mock Honeycomb API

use std::time::Duration;

use honeycombio::client::models::{Environment, EnvironmentColor};
use honeycombio::client::{RateLimitBackoff, RetrySettings};
use honeycombio::{Client, ClientConfig, ConfigError, Context, Error, ListOptions, ResourceApi};
use mockito::{Matcher, ServerGuard};

const AUTH_BODY: &str = r#"{
    "data": {
        "id": "hcxmk_01", "type": "api-keys",
        "attributes": {"name": "terraform", "key_type": "management", "scopes": ["environments:write", "api-keys:write"]},
        "relationships": {"team": {"data": {"type": "teams", "id": "hcatm_01"}}}
    },
    "included": [{"type": "teams", "id": "hcatm_01", "attributes": {"name": "Acme", "slug": "acme"}}]
}"#;

fn env_body(description: &str) -> String {
    serde_json::json!({"data": {
        "id": "hcaen_01",
        "type": "environments",
        "attributes": {
            "name": "Staging",
            "slug": "staging",
            "description": description,
            "color": "gold",
            "settings": {"delete_protected": false},
            "timestamps": {"created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"}
        }
    }})
    .to_string()
}

fn env_page(start: usize, count: usize, next: Option<&str>) -> String {
    let data: Vec<serde_json::Value> = (start..start + count)
        .map(|i| {
            serde_json::json!({
                "type": "environments",
                "id": format!("hcaen_{:02}", i),
                "attributes": {"name": format!("env {}", i), "slug": format!("env-{}", i)}
            })
        })
        .collect();
    let mut doc = serde_json::json!({ "data": data });
    if let Some(next) = next {
        doc["links"] = serde_json::json!({ "next": next });
    }
    doc.to_string()
}

fn fast_retry(max_attempts: usize) -> RetrySettings {
    RetrySettings {
        max_attempts,
        backoff: RateLimitBackoff::new(Duration::from_millis(1), Duration::from_millis(5)),
    }
}

async fn connect(server: &mut ServerGuard, retry: RetrySettings) -> Client {
    let _auth = server
        .mock("GET", "/2/auth")
        .with_status(200)
        .with_body(AUTH_BODY)
        .create_async()
        .await;

    let config = ClientConfig::new()
        .with_credentials("hcxmk_01", "secret")
        .with_base_url(server.url())
        .with_retry(retry)
        .with_jitter_seed(42)
        .resolve_with(|_| None)
        .unwrap();
    Client::from_resolved(&Context::background(), config)
        .await
        .unwrap()
}

#[tokio::test]
async fn environment_crud_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server, fast_retry(1)).await;
    let ctx = Context::background();
    let envs = client.environments();

    let create = server
        .mock("POST", "/2/teams/acme/environments")
        .match_body(Matcher::Json(serde_json::json!({"data": {
            "type": "environments",
            "attributes": {"name": "Staging", "description": "qa", "color": "gold"}
        }})))
        .with_status(201)
        .with_body(env_body("qa"))
        .create_async()
        .await;

    let created = envs
        .create(
            &ctx,
            &Environment {
                name: Some("Staging".to_string()),
                description: Some("qa".to_string()),
                color: Some(EnvironmentColor::Gold),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    create.assert_async().await;

    let get = server
        .mock("GET", "/2/teams/acme/environments/hcaen_01")
        .with_status(200)
        .with_body(env_body("qa"))
        .create_async()
        .await;
    let fetched = envs.get(&ctx, &created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name.as_deref(), Some("Staging"));
    assert_eq!(fetched.color, Some(EnvironmentColor::Gold));

    // Only the description is sent; name and color stay as they are
    let patch = server
        .mock("PATCH", "/2/teams/acme/environments/hcaen_01")
        .match_body(Matcher::Json(serde_json::json!({"data": {
            "type": "environments",
            "id": "hcaen_01",
            "attributes": {"description": "quality assurance"}
        }})))
        .with_status(200)
        .with_body(env_body("quality assurance"))
        .create_async()
        .await;
    let updated = envs
        .update(
            &ctx,
            &Environment {
                description: Some("quality assurance".to_string()),
                ..Environment::with_id("hcaen_01")
            },
        )
        .await
        .unwrap();
    patch.assert_async().await;
    assert_eq!(updated.description.as_deref(), Some("quality assurance"));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.color, created.color);

    let delete = server
        .mock("DELETE", "/2/teams/acme/environments/hcaen_01")
        .with_status(204)
        .create_async()
        .await;
    envs.delete(&ctx, "hcaen_01").await.unwrap();
    delete.assert_async().await;

    get.remove_async().await;
    let _gone = server
        .mock("GET", "/2/teams/acme/environments/hcaen_01")
        .with_status(404)
        .with_body(r#"{"errors":[{"status":"404","title":"Not Found","detail":"environment not found"}]}"#)
        .create_async()
        .await;
    let err = envs.get(&ctx, "hcaen_01").await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[tokio::test]
async fn list_honours_page_size_and_follows_cursor() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server, fast_retry(1)).await;
    let ctx = Context::background();

    let first = server
        .mock("GET", "/2/teams/acme/environments")
        .match_query(Matcher::UrlEncoded("page[size]".into(), "5".into()))
        .with_status(200)
        .with_body(env_page(
            1,
            5,
            Some("/2/teams/acme/environments?page%5Bafter%5D=hcaen_05"),
        ))
        .create_async()
        .await;
    let second = server
        .mock("GET", "/2/teams/acme/environments")
        .match_query(Matcher::UrlEncoded("page[after]".into(), "hcaen_05".into()))
        .with_status(200)
        .with_body(env_page(6, 2, None))
        .create_async()
        .await;

    let mut pager = client
        .environments()
        .list(ListOptions::new().page_size(5))
        .unwrap();

    let page = pager.next(&ctx).await.unwrap();
    assert_eq!(page.len(), 5);
    assert!(pager.has_next());

    let rest = pager.collect_all(&ctx).await.unwrap();
    let ids: Vec<String> = rest.into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["hcaen_06", "hcaen_07"]);

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn rate_limited_requests_surface_429_after_retries() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server, fast_retry(4)).await;

    let throttled = server
        .mock("GET", "/2/teams/acme/environments/hcaen_01")
        .with_status(429)
        .with_header("ratelimit", "limit=100, remaining=0, reset=0")
        .with_body(r#"{"errors":[{"status":"429","title":"Too Many Requests","detail":"rate limit exceeded"}]}"#)
        .expect(4)
        .create_async()
        .await;

    let err = client
        .environments()
        .get(&Context::background(), "hcaen_01")
        .await
        .unwrap_err();

    let api = err.as_api().expect("normalized API error");
    assert_eq!(api.status, 429);
    assert!(api.is_rate_limited());
    throttled.assert_async().await;
}

#[tokio::test]
async fn cancellation_interrupts_backoff() {
    let mut server = mockito::Server::new_async().await;
    let slow_backoff = RetrySettings {
        max_attempts: 15,
        backoff: RateLimitBackoff::new(Duration::from_secs(5), Duration::from_secs(5)),
    };
    let client = connect(&mut server, slow_backoff).await;

    let _bad_gateway = server
        .mock("GET", "/2/teams/acme/environments/hcaen_01")
        .with_status(502)
        .create_async()
        .await;

    let (ctx, handle) = Context::with_cancel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let started = tokio::time::Instant::now();
    let err = client
        .environments()
        .get(&ctx, "hcaen_01")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled), "unexpected error: {err}");
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn deadline_interrupts_backoff() {
    let mut server = mockito::Server::new_async().await;
    let slow_backoff = RetrySettings {
        max_attempts: 15,
        backoff: RateLimitBackoff::new(Duration::from_secs(5), Duration::from_secs(5)),
    };
    let client = connect(&mut server, slow_backoff).await;

    let _gateway_timeout = server
        .mock("GET", "/2/teams/acme/api-keys/hcxik_01")
        .with_status(504)
        .create_async()
        .await;

    let ctx = Context::background().with_timeout(Duration::from_millis(200));
    let err = client
        .api_keys()
        .get(&ctx, "hcxik_01")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded), "unexpected error: {err}");
}

#[tokio::test]
async fn half_a_credential_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let auth = server
        .mock("GET", "/2/auth")
        .expect(0)
        .create_async()
        .await;

    let result = ClientConfig::new()
        .with_base_url(server.url())
        .resolve_with(|name: &str| (name == "HONEYCOMB_KEY_ID").then(|| "hcxmk_01".to_string()));

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingKeySecret))
    ));
    auth.assert_async().await;
}

#[tokio::test]
async fn unauthorized_key_aborts_construction() {
    let mut server = mockito::Server::new_async().await;
    let _auth = server
        .mock("GET", "/2/auth")
        .with_status(401)
        .with_body(r#"{"errors":[{"status":"401","title":"Unauthorized","detail":"invalid API key"}]}"#)
        .create_async()
        .await;

    let config = ClientConfig::new()
        .with_credentials("hcxmk_01", "wrong")
        .with_base_url(server.url())
        .resolve_with(|_| None)
        .unwrap();
    let err = Client::from_resolved(&Context::background(), config)
        .await
        .err()
        .expect("construction should fail");

    assert_eq!(err.as_api().map(|e| e.status), Some(401));
}
