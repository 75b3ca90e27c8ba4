use std::path::Path;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::IngestError;

/// Reads every row of a delimited table with a header line.
///
/// Rows are deserialized by header name. Fields are trimmed and empty
/// optional fields become `None`. Missing `required` columns fail before any
/// row is read.
pub(crate) fn read_table<T: DeserializeOwned>(
    path: &Path,
    delimiter: u8,
    required: &[&str],
) -> Result<Vec<T>, IngestError> {
    let start = Instant::now();
    let name = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| IngestError::Io {
            path: name.clone(),
            message: err.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|err| IngestError::csv(&name, &err))?
        .clone();
    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        warn!(path = %name, column = *column, "table_missing_column");
        return Err(IngestError::MissingColumn {
            path: name,
            column: column.to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row = result.map_err(|err| {
            let err = IngestError::csv(&name, &err);
            warn!(error = %err, "table_malformed_row");
            err
        })?;
        rows.push(row);
    }

    debug!(
        path = %name,
        rows = rows.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "table_read"
    );
    Ok(rows)
}
