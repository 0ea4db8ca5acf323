//! `list`, `get`, `create` and `delete`.

use std::fs;

use log::warn;
use reelboard_lib::model::Record;
use reelboard_lib::model::Resource;
use reelboard_lib::table::DataTable;
use reelboard_lib::table::EventOutcome;
use reelboard_lib::table::TableEvent;
use reelboard_lib::table::render_text;

use super::App;
use crate::columns;
use crate::error::CliError;

/// Table controls for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    /// Header clicks, applied in order.
    pub sort: Vec<String>,
    pub page: usize,
    pub page_size: usize,
}

pub async fn list(app: &App, resource: Resource, options: ListOptions) -> Result<(), CliError> {
    let data = app.client.list_records(resource).await?;
    let table = build_table(resource, &data, options)?;
    print!("{}", render_text(&table.render(&data)));
    Ok(())
}

/// Replays the list options as table events.
fn build_table(resource: Resource, data: &[Record], options: ListOptions) -> Result<DataTable, CliError> {
    let mut table =
        DataTable::new(columns::for_resource(resource), resource.key_field())?.with_page_size(options.page_size);

    if let Some(query) = options.search {
        table.handle(TableEvent::Search(query), data);
    }
    for key in options.sort {
        if table.handle(TableEvent::HeaderClick(key.clone()), data) == EventOutcome::Ignored {
            warn!("Cannot sort {} by '{}'", resource, key);
        }
    }
    table.handle(TableEvent::GoToPage(options.page), data);
    Ok(table)
}

pub async fn get(app: &App, resource: Resource, id: &str) -> Result<(), CliError> {
    let record = app.client.get_record(resource, id).await?;
    println!("{}", pretty(&record)?);
    Ok(())
}

/// `data` is inline JSON, or `@path` to read it from a file.
pub async fn create(app: &App, resource: Resource, data: &str) -> Result<(), CliError> {
    let value = parse_data(data)?;
    let record = app.client.create_record(resource, value).await?;
    println!("{}", pretty(&record)?);
    Ok(())
}

fn parse_data(data: &str) -> Result<serde_json::Value, CliError> {
    let json = match data.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => data.to_string(),
    };
    serde_json::from_str(&json).map_err(CliError::InvalidJson)
}

fn pretty(record: &Record) -> Result<String, CliError> {
    serde_json::to_string_pretty(&record.to_json()).map_err(|e| reelboard_lib::Error::from(e).into())
}

pub async fn delete(app: &App, resource: Resource, id: &str) -> Result<(), CliError> {
    let message = app.client.delete(resource, id).await?;
    println!("{}", message.unwrap_or_else(|| format!("Deleted {} {}", resource, id)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn users() -> Vec<Record> {
        ["Zoe", "Bob", "amy", "Ann"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Record::from_json(json!({ "id": format!("u{}", i), "name": name, "email": "x@example.com" }))
                    .unwrap()
            })
            .collect()
    }

    fn names(table: &DataTable, data: &[Record]) -> Vec<String> {
        table
            .view(data)
            .page_rows()
            .iter()
            .map(|r| r.value("name").to_string())
            .collect()
    }

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data(r#"{"name":"Ada"}"#).unwrap(), json!({ "name": "Ada" }));
        assert!(matches!(parse_data("{name"), Err(CliError::InvalidJson(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("film.json");
        fs::write(&path, r#"{"title":"Heat"}"#).unwrap();
        assert_eq!(parse_data(&format!("@{}", path.display())).unwrap(), json!({ "title": "Heat" }));
    }

    #[test]
    fn test_repeated_sort_flips_direction() {
        let data = users();
        let options = ListOptions {
            sort: vec!["name".into(), "name".into()],
            page: 1,
            page_size: 10,
            ..Default::default()
        };

        let table = build_table(Resource::Users, &data, options).unwrap();

        assert_eq!(names(&table, &data), ["amy", "Zoe", "Bob", "Ann"]);
    }

    #[test]
    fn test_search_then_page() {
        let data = users();
        let options = ListOptions {
            search: Some("a".into()),
            sort: vec!["name".into()],
            page: 2,
            page_size: 1,
        };

        let table = build_table(Resource::Users, &data, options).unwrap();

        // "a" matches Ann and amy (and every email, so all four)
        assert_eq!(table.view(&data).total_pages(), 4);
        assert_eq!(names(&table, &data), ["Bob"]);
    }

    #[test]
    fn test_unsortable_column_is_skipped() {
        let data = users();
        let options = ListOptions {
            sort: vec!["id".into()],
            page: 1,
            page_size: 10,
            ..Default::default()
        };

        let table = build_table(Resource::Users, &data, options).unwrap();

        assert!(table.state().sort().is_none());
    }
}
