//! Resource enum for the CRUD endpoints

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Admin;
use super::Creator;
use super::Film;
use super::NewAdmin;
use super::NewCreator;
use super::NewFilm;
use super::NewPlaylist;
use super::NewUser;
use super::Playlist;
use super::User;
use crate::validation::Validate;

/// A collection exposed by the streaming platform's admin API.
///
/// Each resource maps onto one route segment under the API prefix
/// (e.g., `/api/v1/film/all`).
///
/// # Examples
///
/// ```
/// use reelboard_lib::model::Resource;
///
/// let resource: Resource = "films".parse().unwrap();
/// assert_eq!(resource.segment(), "film");
/// assert_eq!(resource.create_action(), "create");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Admins,
    Creators,
    Users,
    Films,
    Playlists,
}

impl Resource {
    /// All resources, in dashboard menu order.
    pub const ALL: [Resource; 5] = [
        Resource::Films,
        Resource::Creators,
        Resource::Users,
        Resource::Admins,
        Resource::Playlists,
    ];

    /// Returns the route segment used by the API.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Admins => "admin",
            Self::Creators => "creator",
            Self::Users => "user",
            Self::Films => "film",
            Self::Playlists => "playlist",
        }
    }

    /// Returns the plural display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admins => "admins",
            Self::Creators => "creators",
            Self::Users => "users",
            Self::Films => "films",
            Self::Playlists => "playlists",
        }
    }

    /// Returns the action segment for creation.
    ///
    /// Accounts are registered, content is created.
    pub fn create_action(&self) -> &'static str {
        match self {
            Self::Admins | Self::Creators | Self::Users => "register",
            Self::Films | Self::Playlists => "create",
        }
    }

    /// Returns the field that uniquely identifies a record of this resource.
    pub fn key_field(&self) -> &'static str {
        "id"
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" | "admins" => Ok(Self::Admins),
            "creator" | "creators" => Ok(Self::Creators),
            "user" | "users" => Ok(Self::Users),
            "film" | "films" => Ok(Self::Films),
            "playlist" | "playlists" => Ok(Self::Playlists),
            other => Err(format!("unknown resource: {}", other)),
        }
    }
}

/// A typed record of one [`Resource`].
///
/// Ties each entity to its collection and to the payload used to create it,
/// so the client can offer `client.list::<Film>()`.
pub trait Entity: DeserializeOwned + Serialize + Send {
    const RESOURCE: Resource;

    /// Create payload, validated before it is sent.
    type New: Serialize + Validate + Send + Sync;

    /// The record's identifier.
    fn id(&self) -> &str;
}

impl Entity for Admin {
    const RESOURCE: Resource = Resource::Admins;
    type New = NewAdmin;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Creator {
    const RESOURCE: Resource = Resource::Creators;
    type New = NewCreator;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for User {
    const RESOURCE: Resource = Resource::Users;
    type New = NewUser;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Film {
    const RESOURCE: Resource = Resource::Films;
    type New = NewFilm;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Playlist {
    const RESOURCE: Resource = Resource::Playlists;
    type New = NewPlaylist;

    fn id(&self) -> &str {
        &self.id
    }
}
