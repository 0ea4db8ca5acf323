//! Endpoint table.
//!
//! One place that says, for every call the console makes, which route it
//! hits, which session authorizes it and how its response is wrapped.

use reqwest::Method;

use super::envelope::Shape;
use crate::auth::Actor;
use crate::model::Resource;

/// Default API prefix appended to the server URL.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// A route of the platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    /// Path below the API prefix, starting with `/`.
    pub path: String,
    pub shape: Shape,
    /// Session whose token authorizes the call.
    pub actor: Actor,
}

impl Endpoint {
    fn new(method: Method, path: String, shape: Shape, actor: Actor) -> Self {
        Self {
            method,
            path,
            shape,
            actor,
        }
    }

    /// `GET /{resource}/all`
    ///
    /// Films and playlists come back paginated server-side, so their list
    /// payload sits one envelope deeper.
    pub fn list(resource: Resource) -> Self {
        let shape = match resource {
            Resource::Films | Resource::Playlists => Shape::DoubleWrapped,
            Resource::Admins | Resource::Creators | Resource::Users => Shape::Wrapped,
        };
        Self::new(Method::GET, format!("/{}/all", resource.segment()), shape, Actor::Admin)
    }

    /// `GET /{resource}/{id}`
    pub fn get(resource: Resource, id: &str) -> Self {
        Self::new(Method::GET, item_path(resource, id), Shape::Wrapped, Actor::Admin)
    }

    /// `POST /{resource}/register` or `POST /{resource}/create`
    pub fn create(resource: Resource) -> Self {
        Self::new(
            Method::POST,
            format!("/{}/{}", resource.segment(), resource.create_action()),
            Shape::Wrapped,
            Actor::Admin,
        )
    }

    /// `PUT /{resource}/{id}`
    pub fn update(resource: Resource, id: &str) -> Self {
        Self::new(Method::PUT, item_path(resource, id), Shape::Wrapped, Actor::Admin)
    }

    /// `DELETE /{resource}/{id}`
    pub fn delete(resource: Resource, id: &str) -> Self {
        Self::new(Method::DELETE, item_path(resource, id), Shape::Wrapped, Actor::Admin)
    }

    /// `GET /admin/metrics`
    pub fn metrics() -> Self {
        Self::new(Method::GET, "/admin/metrics".to_string(), Shape::Bare, Actor::Admin)
    }

    /// `GET /creator/films`, the signed-in creator's own films.
    pub fn creator_films() -> Self {
        Self::new(Method::GET, "/creator/films".to_string(), Shape::Wrapped, Actor::Creator)
    }

    /// `GET /{actor}/profile`
    pub fn profile(actor: Actor) -> Self {
        Self::new(Method::GET, format!("/{}/profile", actor.segment()), Shape::Wrapped, actor)
    }
}

/// Joins a server URL and an API prefix into the API root.
pub fn api_root(url: &str, prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        url.trim_end_matches('/').to_string()
    } else {
        format!("{}/{}", url.trim_end_matches('/'), prefix)
    }
}

fn item_path(resource: Resource, id: &str) -> String {
    format!("/{}/{}", resource.segment(), urlencoding::encode(id))
}
