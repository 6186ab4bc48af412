//! Spreadsheet describing the custom fields of each entity

pub mod reader;
pub mod writer;

pub use reader::read_field_rows;
pub use writer::{write_field_rows, write_template};

/// Sheet read when none is specified
pub const DEFAULT_SHEET: &str = "extra_field_mapping";

/// Header names, in the order the template writes them
pub mod cols {
    pub const COLUMN_ID: &str = "columnid";
    pub const ENTITY: &str = "entity";
    pub const FIELD_NAME: &str = "extrafieldname";
    pub const FIELD_TYPE: &str = "extrafieldtype";
    pub const DEFAULT_VALUE: &str = "defaultvalue";

    pub const ALL: [&str; 5] = [COLUMN_ID, ENTITY, FIELD_NAME, FIELD_TYPE, DEFAULT_VALUE];
}

/// One custom field row from the spreadsheet, all cells as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRow {
    pub column_id: String,
    pub entity: String,
    pub field_name: String,
    pub field_type: String,
    pub default_value: String,
}
