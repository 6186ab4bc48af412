//! SQL text for the extra-field metadata tables

use std::fmt;

use crate::descriptor::FieldType;
use crate::entity::EntityKind;

/// Metadata table for list-valued fields (dropdown, multiselect)
pub const LIST_FIELDS_TABLE: &str = "tblextrafields";
/// Metadata table for every other field type
pub const PLAIN_FIELDS_TABLE: &str = "tblextrafield";

/// Quote a string as a SQL literal, doubling embedded single quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote a SQL identifier, doubling embedded double quotes
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Row inserted into the metadata table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub table: &'static str,
    pub account_id: String,
    pub column_id: String,
    pub field_type: FieldType,
    pub field_name: String,
    pub entity: EntityKind,
    /// `None` renders as SQL `NULL`
    pub default_value: Option<String>,
}

impl InsertStatement {
    /// Insert for a dropdown/multiselect field with its observed values
    pub fn list_field(
        account_id: &str,
        column_id: &str,
        field_type: FieldType,
        entity: EntityKind,
        values: &[String],
    ) -> Self {
        Self {
            table: LIST_FIELDS_TABLE,
            account_id: account_id.to_string(),
            column_id: column_id.to_string(),
            field_name: format!("custcolumn{}", column_id),
            field_type,
            entity,
            default_value: Some(values.join(",")),
        }
    }

    /// Insert for a field without a value list
    pub fn plain_field(
        account_id: &str,
        column_id: &str,
        field_type: FieldType,
        field_name: &str,
        entity: EntityKind,
    ) -> Self {
        Self {
            table: PLAIN_FIELDS_TABLE,
            account_id: account_id.to_string(),
            column_id: column_id.to_string(),
            field_type,
            field_name: field_name.to_string(),
            entity,
            default_value: None,
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_value = match &self.default_value {
            Some(v) => quote_literal(v),
            None => "NULL".to_string(),
        };
        write!(
            f,
            "INSERT INTO {} (accountid,columnid, extrafieldtype, extrafieldname, entitytypeid, defaultvalue) \
             VALUES ({},{}, {}, {}, {}, {});",
            self.table,
            self.account_id,
            self.column_id,
            quote_literal(self.field_type.as_str()),
            quote_literal(&self.field_name),
            self.entity.entity_type_id(),
            default_value
        )
    }
}

/// Replacement of the stored default set for an existing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    pub account_id: String,
    pub column_id: String,
    pub entity: EntityKind,
    pub default_value: String,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET defaultvalue={} WHERE accountid={} AND columnid={} AND entitytypeid={};",
            LIST_FIELDS_TABLE,
            quote_literal(&self.default_value),
            self.account_id,
            self.column_id,
            self.entity.entity_type_id()
        )
    }
}
