//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::model::Record;

/// Closure that turns a record into the text shown in one cell.
pub type CellRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Column width hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Size to content.
    #[default]
    Auto,
    /// Fixed width in characters.
    Fixed(u16),
}

/// A table column definition.
///
/// `key` names the record field the column reads; keys must be unique
/// within one table. Filtering and sorting always work on the raw field
/// value, the optional renderer only changes what is displayed.
#[derive(Clone)]
pub struct Column {
    /// Field name read from each record.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Custom cell renderer.
    pub render: Option<CellRenderer>,
    /// Width hint.
    pub width: ColumnWidth,
}

impl Column {
    /// Create a new column with the given key and label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
            width: ColumnWidth::Auto,
        }
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Render cells with a custom closure.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Text shown for `record` in this column.
    pub fn cell_text(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => render(record),
            None => record.value(&self.key).to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("width", &self.width)
            .finish()
    }
}
