//! CSV loading for transition matrices
//!
//! Expected columns:
//! `period_key,window_start,window_end,from_state,to_state,probability`
//! with dates in ISO `YYYY-MM-DD` and states as collectibility codes 1-5.

use super::{CollectibilityState, PeriodWindow, StaticMatrixProvider, TransitionMatrix};
use crate::error::MatrixLoadError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MatrixRecord {
    period_key: String,
    window_start: NaiveDate,
    window_end: NaiveDate,
    from_state: u8,
    to_state: u8,
    probability: f64,
}

/// Load matrices from a CSV file on disk
pub fn load_matrices<P: AsRef<Path>>(path: P) -> Result<StaticMatrixProvider, MatrixLoadError> {
    let file = File::open(path)?;
    load_matrices_from_reader(BufReader::new(file))
}

/// Load matrices from any reader producing the matrix CSV format
pub fn load_matrices_from_reader<R: Read>(
    reader: R,
) -> Result<StaticMatrixProvider, MatrixLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // Group parsed triples by period key; the window comes from the first
    // record seen for that key.
    let mut windows: BTreeMap<String, PeriodWindow> = BTreeMap::new();
    let mut triples: BTreeMap<String, Vec<(CollectibilityState, CollectibilityState, f64)>> =
        BTreeMap::new();

    for (idx, result) in csv_reader.deserialize::<MatrixRecord>().enumerate() {
        let record_no = idx as u64 + 1;
        let record = result?;

        let from = CollectibilityState::from_code(record.from_state).ok_or(
            MatrixLoadError::UnknownState {
                code: record.from_state,
                record: record_no,
            },
        )?;
        let to = CollectibilityState::from_code(record.to_state).ok_or(
            MatrixLoadError::UnknownState {
                code: record.to_state,
                record: record_no,
            },
        )?;
        if !(0.0..=1.0).contains(&record.probability) {
            return Err(MatrixLoadError::ProbabilityOutOfRange {
                probability: record.probability,
                record: record_no,
            });
        }
        if record.window_end < record.window_start {
            return Err(MatrixLoadError::InvertedWindow {
                period_key: record.period_key,
                start: record.window_start,
                end: record.window_end,
            });
        }

        windows.entry(record.period_key.clone()).or_insert(PeriodWindow {
            start: record.window_start,
            end: record.window_end,
        });
        triples
            .entry(record.period_key)
            .or_default()
            .push((from, to, record.probability));
    }

    if triples.is_empty() {
        return Err(MatrixLoadError::Empty);
    }

    let mut provider = StaticMatrixProvider::default();
    for (period_key, transitions) in triples {
        let window = windows[&period_key];
        provider.insert(
            period_key,
            TransitionMatrix::from_transitions(transitions).with_window(window),
        );
    }
    Ok(provider)
}
