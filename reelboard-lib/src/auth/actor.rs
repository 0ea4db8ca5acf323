//! The two kinds of signed-in user

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Who a session belongs to.
///
/// Admins manage the whole platform; creators manage their own films. Each
/// actor has its own login endpoint and its own session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Admin,
    Creator,
}

impl Actor {
    pub const ALL: [Actor; 2] = [Actor::Admin, Actor::Creator];

    /// Route segment of the actor's auth endpoints.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Creator => "creator",
        }
    }

    /// Name of the cookie carrying the actor's bearer token.
    pub fn cookie_name(self) -> &'static str {
        match self {
            Self::Admin => "adminToken",
            Self::Creator => "creatorToken",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Actor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "creator" => Ok(Self::Creator),
            other => Err(format!("unknown actor: {}", other)),
        }
    }
}
