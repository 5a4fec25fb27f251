//! In-memory prediction history
//!
//! An owned, bounded store injected through `AppState`. The oldest record is
//! evicted once capacity is reached; nothing is persisted across restarts.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use shared::{PredictionResult, WeatherObservation};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::error::AppResult;
use crate::services::reporting::ReportingService;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One successful prediction; field order is the CSV column order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictionRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub season: String,
    pub predicted_rainfall: f64,
    pub probability: u8,
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

impl PredictionRecord {
    pub fn new(
        observation: &WeatherObservation,
        result: &PredictionResult,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            timestamp,
            location: observation.location.clone(),
            temperature: observation.temperature,
            humidity: observation.humidity,
            pressure: observation.pressure,
            wind_speed: observation.wind_speed,
            cloud_cover: observation.cloud_cover,
            season: observation.season.clone(),
            predicted_rainfall: result.rainfall_mm,
            probability: result.probability_pct,
        }
    }
}

/// Bounded, thread-safe prediction history
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    records: Mutex<VecDeque<PredictionRecord>>,
}

impl HistoryStore {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PredictionRecord>> {
        // A panicked writer cannot leave a half-pushed record behind.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn append(&self, record: PredictionRecord) {
        let mut records = self.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Up to `n` most recent records, oldest first
    pub fn recent(&self, n: usize) -> Vec<PredictionRecord> {
        let records = self.lock();
        let skip = records.len().saturating_sub(n);
        records.iter().skip(skip).cloned().collect()
    }

    /// All records, oldest first
    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.lock().iter().cloned().collect()
    }

    /// All records as CSV with a header row
    pub fn to_csv(&self) -> AppResult<String> {
        ReportingService::export_to_csv(&self.snapshot())
    }
}
