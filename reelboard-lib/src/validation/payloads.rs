//! Rules for create payloads.

use std::sync::LazyLock;

use regex::Regex;

use super::Validate;
use super::Validator;
use crate::error::ValidationErrors;
use crate::model::NewAdmin;
use crate::model::NewCreator;
use crate::model::NewFilm;
use crate::model::NewPlaylist;
use crate::model::NewUser;

const MIN_PASSWORD: usize = 8;

static CHANNEL_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 _.-]+$").ok());

fn account(name: &str, email: &str, password: &str) -> Validator {
    Validator::new()
        .field("name", name)
        .required("Name is required")
        .max_length(100, "Name must be at most 100 characters")
        .field("email", email)
        .required("Email is required")
        .email("Invalid email format")
        .field("password", password)
        .required("Password is required")
        .min_length(
            MIN_PASSWORD,
            format!("Password must be at least {} characters", MIN_PASSWORD),
        )
        .done()
}

impl Validate for NewAdmin {
    fn validate(&self) -> Result<(), ValidationErrors> {
        account(&self.name, &self.email, &self.password).finish()
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        account(&self.name, &self.email, &self.password).finish()
    }
}

impl Validate for NewCreator {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let rules = account(&self.name, &self.email, &self.password)
            .field("channelName", self.channel_name.as_deref().unwrap_or(""))
            .max_length(60, "Channel name must be at most 60 characters");
        match CHANNEL_NAME.as_ref() {
            Some(re) => rules
                .pattern(re, "Channel name may only use letters, digits, spaces, '.', '_' and '-'")
                .finish(),
            None => rules.finish(),
        }
    }
}

impl Validate for NewFilm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new()
            .field("title", &self.title)
            .required("Title is required")
            .max_length(200, "Title must be at most 200 characters")
            .field("videoUrl", &self.video_url)
            .required("Video URL is required")
            .url("Video URL must be an http(s) URL")
            .field("thumbnailUrl", self.thumbnail_url.as_deref().unwrap_or(""))
            .url("Thumbnail URL must be an http(s) URL")
            .number("duration", self.duration.map(f64::from))
            .positive("Duration must be positive")
            .number("releaseYear", self.release_year.map(f64::from))
            .range(1888.0, 2100.0, "Release year must be between 1888 and 2100")
            .done();

        if self.genre.iter().any(|g| g.trim().is_empty()) {
            validator = validator.error("genre", "required", "Genres cannot be blank");
        }
        validator.finish()
    }
}

impl Validate for NewPlaylist {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = Validator::new()
            .field("name", &self.name)
            .required("Name is required")
            .max_length(100, "Name must be at most 100 characters")
            .field("description", &self.description)
            .max_length(500, "Description must be at most 500 characters")
            .done();

        if self.films.iter().any(|id| id.trim().is_empty()) {
            validator = validator.error("films", "required", "Film ids cannot be blank");
        }
        validator.finish()
    }
}
