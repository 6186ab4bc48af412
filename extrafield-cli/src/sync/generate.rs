//! Generate pass: INSERT statements for fields not yet in the metadata table

use anyhow::Result;

use super::{PassOutcome, PassSummary, SyncContext, record_failure};
use crate::descriptor::{DescriptorSyntax, parse_descriptors};
use crate::entity::EntityKind;
use crate::output::OutputKind;
use crate::reconcile::prepare_values;
use crate::sql::InsertStatement;

/// Run the generate pass over a quoted descriptor string
///
/// List-valued fields get their default set from the values observed in the
/// table; other fields are inserted with a NULL default.
pub async fn run_generate(ctx: &SyncContext<'_>, input: &str) -> Result<PassOutcome> {
    let entity = EntityKind::for_table(ctx.table)?;
    let result = generate_inserts(ctx, entity, input).await;
    record_failure(ctx.files, OutputKind::Inserts, result)
}

async fn generate_inserts(
    ctx: &SyncContext<'_>,
    entity: EntityKind,
    input: &str,
) -> Result<PassOutcome> {
    let mut summary = PassSummary::default();

    for field in parse_descriptors(input, DescriptorSyntax::Quoted) {
        summary.fields += 1;

        let statement = if field.field_type.has_value_list() {
            let column = field.column_name();
            let distinct = ctx.source.distinct_values(ctx.table, &column).await?;

            let values = match prepare_values(&field.field_type, &column, &distinct) {
                Ok(values) => values,
                Err(alerts) => {
                    return Ok(PassOutcome::Aborted {
                        column,
                        alerts,
                        summary,
                    });
                }
            };

            InsertStatement::list_field(
                ctx.account_id,
                &field.column_id,
                field.field_type.clone(),
                entity,
                &values,
            )
        } else {
            InsertStatement::plain_field(
                ctx.account_id,
                &field.column_id,
                field.field_type.clone(),
                &field.field_name,
                entity,
            )
        };

        ctx.files
            .append(OutputKind::Inserts, &statement.to_string())?;
        summary.inserts += 1;
    }

    log::info!(
        "Generate pass: {} fields, {} inserts",
        summary.fields,
        summary.inserts
    );
    Ok(PassOutcome::Completed(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::Alert;
    use crate::source::MemorySource;
    use crate::sync::test_support::{lines, temp_files};

    const TABLE: &str = "candidate_custom_data";

    #[tokio::test]
    async fn test_generates_list_and_plain_inserts() {
        let (files, dir) = temp_files("generate-basic");
        let source = MemorySource::new()
            .with_column(TABLE, "custcolumn1", [Some("Open"), Some("Closed"), None, Some("Open")])
            .with_column(TABLE, "custcolumn2", [Some("Rust,Go"), Some("Go,SQL")]);
        let ctx = SyncContext {
            source: &source,
            files: &files,
            table: TABLE,
            account_id: "42",
        };

        let input = "1-dropdown-Status-`Open`~2-multiselect-Skills-``~3-text-Notes-``";
        let outcome = run_generate(&ctx, input).await.unwrap();

        assert_eq!(outcome.summary().inserts, 3);
        assert_eq!(
            lines(&files, OutputKind::Inserts),
            vec![
                "INSERT INTO tblextrafields (accountid,columnid, extrafieldtype, extrafieldname, entitytypeid, defaultvalue) VALUES (42,1, 'dropdown', 'custcolumn1', 5, 'Closed,Open');",
                "INSERT INTO tblextrafields (accountid,columnid, extrafieldtype, extrafieldname, entitytypeid, defaultvalue) VALUES (42,2, 'multiselect', 'custcolumn2', 5, 'Go,Rust,SQL');",
                "INSERT INTO tblextrafield (accountid,columnid, extrafieldtype, extrafieldname, entitytypeid, defaultvalue) VALUES (42,3, 'text', 'Notes', 5, NULL);",
            ]
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_alert_stops_pass() {
        let (files, dir) = temp_files("generate-alert");
        let source = MemorySource::new()
            .with_column(TABLE, "custcolumn1", [Some("Open")])
            .with_column(TABLE, "custcolumn2", [Some("Bad,Value")])
            .with_column(TABLE, "custcolumn3", [Some("Never")]);
        let ctx = SyncContext {
            source: &source,
            files: &files,
            table: TABLE,
            account_id: "42",
        };

        let input = "1-dropdown-A-``~2-dropdown-B-``~3-dropdown-C-``";
        let outcome = run_generate(&ctx, input).await.unwrap();

        match outcome {
            PassOutcome::Aborted { column, alerts, summary } => {
                assert_eq!(column, "custcolumn2");
                assert_eq!(
                    alerts,
                    vec![Alert::CommaInDropdown {
                        column: "custcolumn2".into()
                    }]
                );
                assert_eq!(summary.inserts, 1);
            }
            other => panic!("expected abort, got {:?}", other),
        }
        assert_eq!(lines(&files, OutputKind::Inserts).len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_unknown_table_writes_nothing() {
        let (files, dir) = temp_files("generate-table");
        let source = MemorySource::new();
        let ctx = SyncContext {
            source: &source,
            files: &files,
            table: "lead_custom_data",
            account_id: "42",
        };

        assert!(run_generate(&ctx, "1-text-A-``").await.is_err());
        assert!(lines(&files, OutputKind::Inserts).is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_database_error_is_recorded() {
        let (files, dir) = temp_files("generate-dberr");
        let source = MemorySource::new()
            .with_column(TABLE, "custcolumn1", [Some("x")])
            .failing_on(TABLE, "custcolumn1");
        let ctx = SyncContext {
            source: &source,
            files: &files,
            table: TABLE,
            account_id: "42",
        };

        assert!(run_generate(&ctx, "1-dropdown-A-``").await.is_err());
        let written = lines(&files, OutputKind::Inserts);
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("Database Error:"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
