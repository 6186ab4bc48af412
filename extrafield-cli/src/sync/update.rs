//! Update pass: widen stored default sets with values found in the data

use anyhow::Result;

use super::{PassOutcome, PassSummary, SyncContext, record_failure};
use crate::descriptor::{DescriptorSyntax, FieldDescriptor, parse_descriptors};
use crate::entity::EntityKind;
use crate::output::OutputKind;
use crate::reconcile::{case_insensitive_matches, compare, merge_defaults, prepare_values};
use crate::sql::UpdateStatement;

/// Run the update pass over a descriptor string built from the spreadsheet
pub async fn run_update(ctx: &SyncContext<'_>, input: &str) -> Result<PassOutcome> {
    let entity = EntityKind::for_table(ctx.table)?;
    let result = generate_updates(ctx, entity, input).await;
    record_failure(ctx.files, OutputKind::Log, result)
}

async fn generate_updates(
    ctx: &SyncContext<'_>,
    entity: EntityKind,
    input: &str,
) -> Result<PassOutcome> {
    let mut summary = PassSummary::default();

    for field in parse_descriptors(input, DescriptorSyntax::Loose) {
        summary.fields += 1;
        let column = field.column_name();

        if !ctx.source.column_exists(ctx.table, &column).await? {
            log::debug!("Skipping {}: no such column in {}", column, ctx.table);
            summary.missing_columns += 1;
            continue;
        }

        if !field.field_type.has_value_list() {
            continue;
        }

        let distinct = ctx.source.distinct_values(ctx.table, &column).await?;
        let db_values = match prepare_values(&field.field_type, &column, &distinct) {
            Ok(values) => values,
            Err(alerts) => {
                return Ok(PassOutcome::Aborted {
                    column,
                    alerts,
                    summary,
                });
            }
        };

        if let Some(statement) = reconcile_field(ctx, entity, &field, &db_values, &mut summary)? {
            ctx.files
                .append(OutputKind::Updates, &statement.to_string())?;
            summary.updates += 1;
        }
    }

    log::info!(
        "Update pass: {} fields, {} updates, {} missing columns, {} case conflicts",
        summary.fields,
        summary.updates,
        summary.missing_columns,
        summary.case_conflicts
    );
    Ok(PassOutcome::Completed(summary))
}

/// Compare one field's declared defaults with its normalized column values
///
/// Writes the log and mappable lines; returns the UPDATE to emit, if any.
fn reconcile_field(
    ctx: &SyncContext<'_>,
    entity: EntityKind,
    field: &FieldDescriptor,
    db_values: &[String],
    summary: &mut PassSummary,
) -> Result<Option<UpdateStatement>> {
    let column = field.column_name();
    let defaults = field.default_values();

    // Case-only differences need a human decision before anything is merged
    let matches = case_insensitive_matches(&defaults, db_values);
    if !matches.is_empty() {
        for m in &matches {
            ctx.files.append(
                OutputKind::Mappable,
                &format!(
                    "The db value '{}' in {} can be mapped to '{}'",
                    m.db_value, column, m.default_value
                ),
            )?;
        }
        summary.case_conflicts += 1;
        return Ok(None);
    }

    let comparison = compare(&defaults, db_values);

    if !comparison.existing.is_empty() {
        ctx.files.append(
            OutputKind::Log,
            &format!(
                "Existing default values in {}: {}",
                column,
                comparison.existing.join(", ")
            ),
        )?;
    }

    if !comparison.has_new_values() {
        summary.unchanged += 1;
        return Ok(None);
    }

    ctx.files.append(
        OutputKind::Log,
        &format!(
            "New default values in {}: {}",
            column,
            comparison.new.join(", ")
        ),
    )?;

    Ok(Some(UpdateStatement {
        account_id: ctx.account_id.to_string(),
        column_id: field.column_id.clone(),
        entity,
        default_value: merge_defaults(&defaults, &comparison.new),
    }))
}
