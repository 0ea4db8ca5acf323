//! Column presets per resource.

use reelboard_lib::model::Record;
use reelboard_lib::model::Resource;
use reelboard_lib::model::Value;
use reelboard_lib::table::Column;

/// Columns shown by `reelboard list <resource>`.
pub fn for_resource(resource: Resource) -> Vec<Column> {
    let id = Column::new("id", "ID").fixed(24);
    match resource {
        Resource::Films => vec![
            id,
            Column::new("title", "Title").sortable(),
            Column::new("genre", "Genre"),
            Column::new("releaseYear", "Year").sortable(),
            Column::new("duration", "Runtime").sortable().render(minutes),
            Column::new("views", "Views").sortable(),
            Column::new("rating", "Rating").sortable().render(rating),
        ],
        Resource::Creators => vec![
            id,
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("channelName", "Channel").sortable(),
            Column::new("subscribers", "Subscribers").sortable(),
            Column::new("verified", "Verified").render(|r| yes_no(r, "verified")),
        ],
        Resource::Users => vec![
            id,
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("status", "Status").sortable(),
            Column::new("createdAt", "Joined").sortable().render(|r| date(r, "createdAt")),
        ],
        Resource::Admins => vec![
            id,
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("role", "Role").sortable(),
            Column::new("createdAt", "Created").sortable().render(|r| date(r, "createdAt")),
        ],
        Resource::Playlists => vec![
            id,
            Column::new("name", "Name").sortable(),
            Column::new("films", "Films").render(film_count),
            Column::new("isPublic", "Public").render(|r| yes_no(r, "isPublic")),
            Column::new("ownerId", "Owner"),
        ],
    }
}

fn minutes(record: &Record) -> String {
    match record.value("duration").as_f64() {
        Some(m) => format!("{} min", m.round() as i64),
        None => String::new(),
    }
}

fn rating(record: &Record) -> String {
    match record.value("rating").as_f64() {
        Some(r) => format!("{:.1}", r),
        None => String::new(),
    }
}

fn yes_no(record: &Record, key: &str) -> String {
    match record.value(key) {
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        other => other.to_string(),
    }
}

/// Day part of an RFC 3339 timestamp; anything else is shown as is.
fn date(record: &Record, key: &str) -> String {
    match record.value(key) {
        Value::String(s) => match chrono::DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.with_timezone(&chrono::Utc).format("%Y-%m-%d").to_string(),
            Err(_) => s.clone(),
        },
        Value::DateTime(dt) => dt.format("%Y-%m-%d").to_string(),
        other => other.to_string(),
    }
}

fn film_count(record: &Record) -> String {
    match record.value("films") {
        Value::Json(serde_json::Value::Array(items)) => items.len().to_string(),
        Value::Null => "0".to_string(),
        other => other.to_string(),
    }
}
