//! Reporting service for prediction history export

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::history::HistoryStore;

/// Column order of the exported history
pub const CSV_COLUMNS: [&str; 10] = [
    "timestamp",
    "location",
    "temperature",
    "humidity",
    "pressure",
    "wind_speed",
    "cloud_cover",
    "season",
    "predicted_rainfall",
    "probability",
];

/// Reporting service
pub struct ReportingService;

impl ReportingService {
    /// Export the whole history as CSV, refusing when there is nothing to export
    pub fn export_history(history: &HistoryStore) -> AppResult<String> {
        let rows = history.len();
        if rows == 0 {
            return Err(AppError::NoPredictionsToExport);
        }
        let csv = history.to_csv()?;
        tracing::info!(rows, "Exported prediction history");
        Ok(csv)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    /// Download file name stamped with the export time
    pub fn export_file_name(now: NaiveDateTime) -> String {
        format!("rainfall_predictions_{}.csv", now.format("%Y%m%d_%H%M%S"))
    }
}
