mod common;

use std::sync::Arc;

use chrono::Duration;
use common::MockApi;
use common::MockResponse;
use common::jwt;
use common::set_cookie;
use reelboard_lib::Error;
use reelboard_lib::auth::Actor;
use reelboard_lib::auth::AuthContext;
use reelboard_lib::auth::CookieStore;
use reelboard_lib::auth::MemoryCookieStore;
use reelboard_lib::auth::SqliteCookieStore;
use reelboard_lib::auth::StoredCookie;
use reelboard_lib::error::AuthError;
use serde_json::json;

fn login_with_cookie(mock: &MockApi, actor: Actor, token: &str) {
    mock.on(
        "POST",
        &format!("/{}/login", actor.segment()),
        MockResponse::wrapped(json!({ "name": "Root" }))
            .header("Set-Cookie", &set_cookie(actor.cookie_name(), token)),
    );
}

#[tokio::test]
async fn test_login_reads_token_cookie() {
    let mock = MockApi::start().await;
    let token = jwt("admin-1", Duration::hours(1));
    login_with_cookie(&mock, Actor::Admin, &token);

    let store = Arc::new(MemoryCookieStore::new());
    let auth = AuthContext::new(mock.api_root(), store.clone());
    let access = auth.admin().login("root@example.com", "secret").await.unwrap();

    assert_eq!(access.access_token, token);
    assert_eq!(access.subject.as_deref(), Some("admin-1"));
    assert_eq!(auth.admin().token().await.unwrap(), token);

    let stored = store.get("adminToken").await.unwrap().unwrap();
    assert_eq!(stored.value, token);
    assert!(stored.http_only);

    let body = mock.requests_to("/admin/login")[0].json();
    assert_eq!(body, json!({ "email": "root@example.com", "password": "secret" }));
}

#[tokio::test]
async fn test_login_falls_back_to_body_token() {
    let mock = MockApi::start().await;
    let token = jwt("creator-1", Duration::hours(1));
    mock.on("POST", "/creator/login", MockResponse::wrapped(json!({ "token": token })));

    let auth = AuthContext::in_memory(mock.api_root());
    auth.creator().login("maker@example.com", "secret").await.unwrap();

    assert_eq!(auth.creator().token().await.unwrap(), token);
    // The other actor is untouched
    assert!(matches!(
        auth.admin().token().await,
        Err(Error::Auth(AuthError::NotLoggedIn { actor: Actor::Admin }))
    ));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let mock = MockApi::start().await;
    mock.on(
        "POST",
        "/admin/login",
        MockResponse::json(401, json!({ "success": false, "message": "Invalid email or password" })),
    );

    let auth = AuthContext::in_memory(mock.api_root());
    let err = auth.admin().login("root@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    assert!(auth.admin().current().await.is_none());
}

#[tokio::test]
async fn test_token_refreshes_inside_buffer() {
    let mock = MockApi::start().await;
    // Two minutes left, inside the default five minute buffer
    let old = jwt("admin-1", Duration::minutes(2));
    let new = jwt("admin-1", Duration::hours(1));
    login_with_cookie(&mock, Actor::Admin, &old);
    mock.on(
        "POST",
        "/admin/refresh-token",
        MockResponse::wrapped(json!({})).header("Set-Cookie", &set_cookie("adminToken", &new)),
    );

    let auth = AuthContext::in_memory(mock.api_root());
    auth.admin().login("root@example.com", "secret").await.unwrap();

    assert_eq!(auth.admin().token().await.unwrap(), new);
    // Fresh token is served from memory
    assert_eq!(auth.admin().token().await.unwrap(), new);

    let refreshes = mock.requests_to("/admin/refresh-token");
    assert_eq!(refreshes.len(), 1);
    assert_eq!(refreshes[0].authorization.as_deref(), Some(format!("Bearer {}", old).as_str()));
}

#[tokio::test]
async fn test_concurrent_callers_refresh_once() {
    let mock = MockApi::start().await;
    let old = jwt("admin-1", Duration::minutes(1));
    let new = jwt("admin-1", Duration::hours(1));
    login_with_cookie(&mock, Actor::Admin, &old);
    mock.on("POST", "/admin/refresh-token", MockResponse::wrapped(json!({ "token": new })));

    let auth = AuthContext::in_memory(mock.api_root());
    auth.admin().login("root@example.com", "secret").await.unwrap();

    let (a, b, c) = tokio::join!(auth.admin().token(), auth.admin().token(), auth.admin().token());

    assert_eq!(a.unwrap(), new);
    assert_eq!(b.unwrap(), new);
    assert_eq!(c.unwrap(), new);
    assert_eq!(mock.requests_to("/admin/refresh-token").len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_requires_reauth() {
    let mock = MockApi::start().await;
    let old = jwt("admin-1", Duration::minutes(2));
    login_with_cookie(&mock, Actor::Admin, &old);
    mock.on(
        "POST",
        "/admin/refresh-token",
        MockResponse::json(403, json!({ "success": false, "message": "refresh denied" })),
    );

    let store = Arc::new(MemoryCookieStore::new());
    let auth = AuthContext::new(mock.api_root(), store.clone());
    auth.admin().login("root@example.com", "secret").await.unwrap();

    let err = auth.admin().token().await.unwrap_err();

    match err {
        Error::Auth(AuthError::ReauthRequired { actor, message }) => {
            assert_eq!(actor, Actor::Admin);
            assert!(message.contains("refresh denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(auth.admin().current().await.is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_expired_token_ends_session() {
    let mock = MockApi::start().await;
    let store = Arc::new(MemoryCookieStore::new());
    store
        .set(StoredCookie::new("creatorToken", jwt("creator-1", Duration::minutes(-5))))
        .await
        .unwrap();

    let auth = AuthContext::new(mock.api_root(), store.clone());
    let err = auth.creator().token().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::SessionExpired { actor: Actor::Creator })
    ));
    assert!(store.is_empty());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_profile_of_signed_in_actor() {
    let mock = MockApi::start().await;
    let token = jwt("admin-1", Duration::hours(1));
    login_with_cookie(&mock, Actor::Admin, &token);
    mock.on(
        "GET",
        "/admin/profile",
        MockResponse::wrapped(json!({ "_id": "admin-1", "name": "Root", "email": "root@example.com" })),
    );

    let auth = AuthContext::in_memory(mock.api_root());
    auth.admin().login("root@example.com", "secret").await.unwrap();
    let profile = auth.admin().profile().await.unwrap();

    assert_eq!(profile.id, "admin-1");
    assert_eq!(profile.name, "Root");
}

#[tokio::test]
async fn test_logout_all_clears_both_sessions() {
    let mock = MockApi::start().await;
    login_with_cookie(&mock, Actor::Admin, &jwt("admin-1", Duration::hours(1)));
    login_with_cookie(&mock, Actor::Creator, &jwt("creator-1", Duration::hours(1)));
    mock.on("POST", "/admin/logout", MockResponse::wrapped(json!(null)));
    // Server side failure must not keep the creator signed in
    mock.on("POST", "/creator/logout", MockResponse::json(500, json!({ "message": "down" })));

    let store = Arc::new(MemoryCookieStore::new());
    let auth = AuthContext::new(mock.api_root(), store.clone());
    auth.admin().login("root@example.com", "secret").await.unwrap();
    auth.creator().login("maker@example.com", "secret").await.unwrap();
    assert_eq!(store.len(), 2);

    auth.logout_all().await.unwrap();

    assert!(store.is_empty());
    assert!(auth.admin().current().await.is_none());
    assert!(auth.creator().current().await.is_none());
    assert_eq!(mock.requests_to("/admin/logout").len(), 1);
    assert_eq!(mock.requests_to("/creator/logout").len(), 1);
}

#[tokio::test]
async fn test_session_survives_restart_with_sqlite_store() {
    let mock = MockApi::start().await;
    let token = jwt("admin-1", Duration::hours(1));
    login_with_cookie(&mock, Actor::Admin, &token);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    {
        let store = Arc::new(SqliteCookieStore::open(&path).await.unwrap());
        let auth = AuthContext::new(mock.api_root(), store);
        auth.admin().login("root@example.com", "secret").await.unwrap();
    }

    let store = Arc::new(SqliteCookieStore::open(&path).await.unwrap());
    let auth = AuthContext::new(mock.api_root(), store);
    auth.restore().await.unwrap();

    let restored = auth.admin().current().await.unwrap();
    assert_eq!(restored.access_token, token);
    assert!(auth.creator().current().await.is_none());
    assert_eq!(mock.requests_to("/admin/login").len(), 1);
}
