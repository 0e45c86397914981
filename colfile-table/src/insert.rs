//! Row insertion.
//!
//! A row is split into one fixed-width record per attribute and each record
//! is appended to its attribute's column file. Every value is validated
//! before the first byte is written, so a rejected row never leaves a partial
//! row behind. Appends themselves are not atomic across column files: a
//! failure (or crash) after the first append leaves the files out of step,
//! which the scan engine later reports as corruption.

use colfile_result::{Error, Result};
use colfile_storage::{ColumnFileStore, ColumnWriter};
use colfile_types::{TableHandle, Value, codec};

/// Append one row to `table`.
///
/// `values` must hold exactly one entry per attribute, in ordinal order.
///
/// # Errors
///
/// Validation, before anything is written:
/// - [`Error::InvalidArgumentError`] for the wrong number of values, or a
///   value whose type or length does not match its attribute.
/// - [`Error::UnsupportedColumnType`] for a variable-width attribute.
/// - [`Error::NullValueUnsupported`] for a NULL value.
///
/// While writing:
/// - [`Error::FileAccess`] if a column file cannot be opened or appended.
pub fn insert_row<S>(store: &S, table: &TableHandle, values: &[Value]) -> Result<()>
where
    S: ColumnFileStore,
{
    if values.len() != table.attribute_count() {
        return Err(Error::invalid_argument(format!(
            "table {} has {} attributes but the row has {} values",
            table.id(),
            table.attribute_count(),
            values.len()
        )));
    }

    for (ordinal, (attr, value)) in table.attributes().iter().zip(values).enumerate() {
        if let Err(err) = codec::check_value(ordinal, attr, value) {
            tracing::debug!(
                table_id = table.id(),
                ordinal,
                error = %err,
                "rejected row"
            );
            return Err(err);
        }
    }

    let mut record = Vec::new();
    for (ordinal, (attr, value)) in table.attributes().iter().zip(values).enumerate() {
        record.clear();
        codec::encode_into(ordinal, attr, value, &mut record)?;

        let appended = store.open_for_append(table, ordinal).and_then(|mut writer| {
            let res = writer.append_record(&record);
            writer.close();
            res
        });
        if let Err(err) = appended {
            if ordinal > 0 {
                tracing::warn!(
                    table_id = table.id(),
                    ordinal,
                    "append failed after earlier columns were written; column files are out of sync"
                );
            }
            return Err(err);
        }
    }

    tracing::trace!(table_id = table.id(), "inserted row");
    Ok(())
}
