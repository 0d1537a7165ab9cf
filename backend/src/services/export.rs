//! CSV export of normalized time-series tables

use shared::risk::NormalizedTable;

use crate::error::{AppError, AppResult};

/// Serialize a normalized table to CSV: a header row of column names, then
/// one line per timestamp index. Unset cells stay empty.
pub fn table_to_csv(table: &NormalizedTable) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let names: Vec<&str> = table.column_names().collect();
    wtr.write_record(&names)
        .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;

    for row in 0..table.num_rows() {
        let record: Vec<String> = (0..names.len())
            .map(|col| {
                table
                    .cell(row, col)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        wtr.write_record(&record)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }

    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}
