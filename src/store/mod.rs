//! Result accumulation and durable table output.
//!
//! `RunState` is the append-only, single-writer accumulation of the
//! run; `CsvStore` persists it as the three tables sharing one schema:
//! the primary output, an immutable timestamped snapshot, and the
//! periodically overwritten checkpoint.

pub mod csv;

use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::error::{HarvestError, Result};
use crate::targets::Target;
use crate::types::ForecastRecord;

/// Output schema shared by all three tables.
pub const COLUMNS: [&str; 4] = ["target_id", "date", "temp_min", "temp_max"];

pub const PRIMARY_FILE: &str = "temperatura_previsao.csv";
pub const CHECKPOINT_FILE: &str = "temperatura_previsao_checkpoint.csv";

/// Accumulated state of one run. Append-only; the (target, date) key
/// is never duplicated — a duplicate append is dropped with a warning.
#[derive(Debug, Default)]
pub struct RunState {
	records: Vec<ForecastRecord>,
	seen: HashSet<(Target, NaiveDate)>,
	processed: usize,
	checkpoints: usize,
}

impl RunState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a batch of records, dropping any whose key was already
	/// recorded. Returns the number accepted.
	pub fn append(&mut self, batch: Vec<ForecastRecord>) -> usize {
		let mut accepted = 0;
		for record in batch {
			if self.seen.insert(record.key()) {
				self.records.push(record);
				accepted += 1;
			} else {
				warn!(
					target = "previsao.store",
					target_code = %record.target,
					date = %record.date,
					"duplicate (target, date) record dropped"
				);
			}
		}
		accepted
	}

	pub fn records(&self) -> &[ForecastRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Counts one finished target (success or exhaustion) and returns
	/// the new processed count.
	pub fn mark_processed(&mut self) -> usize {
		self.processed += 1;
		self.processed
	}

	pub fn processed(&self) -> usize {
		self.processed
	}

	pub fn note_checkpoint(&mut self) {
		self.checkpoints += 1;
	}

	pub fn checkpoints(&self) -> usize {
		self.checkpoints
	}
}

/// Durable destination for accumulated records. A sink failure is
/// reported but never aborts collection; the state stays in memory for
/// later attempts.
pub trait RecordSink {
	/// Persists the full state so far, overwriting the prior checkpoint.
	fn checkpoint(&mut self, state: &RunState) -> Result<()>;

	/// Persists the primary output plus an immutable snapshot copy.
	fn finalize(&mut self, state: &RunState) -> Result<()>;
}

/// Writes the three CSV tables under one output directory.
pub struct CsvStore {
	out_dir: PathBuf,
}

impl CsvStore {
	pub fn new(out_dir: impl Into<PathBuf>) -> Self {
		Self { out_dir: out_dir.into() }
	}

	pub fn primary_path(&self) -> PathBuf {
		self.out_dir.join(PRIMARY_FILE)
	}

	pub fn checkpoint_path(&self) -> PathBuf {
		self.out_dir.join(CHECKPOINT_FILE)
	}

	pub fn snapshot_path(&self, stamp: &str) -> PathBuf {
		self.out_dir.join(format!("temperatura_previsao_{stamp}.csv"))
	}

	fn write_table(&self, path: &Path, records: &[ForecastRecord]) -> Result<()> {
		let persistence = |source: std::io::Error| HarvestError::Persistence {
			path: path.to_path_buf(),
			source,
		};

		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent).map_err(persistence)?;
			}
		}

		let file = fs::File::create(path).map_err(persistence)?;
		let mut writer = BufWriter::new(file);

		csv::write_row(&mut writer, &COLUMNS).map_err(persistence)?;
		for record in records {
			let date = record.date.format("%Y-%m-%d").to_string();
			let row = [record.target.code(), date.as_str(), record.temp_min.as_str(), record.temp_max.as_str()];
			csv::write_row(&mut writer, &row).map_err(persistence)?;
		}

		writer.flush().map_err(persistence)
	}
}

impl RecordSink for CsvStore {
	fn checkpoint(&mut self, state: &RunState) -> Result<()> {
		self.write_table(&self.checkpoint_path(), state.records())
	}

	fn finalize(&mut self, state: &RunState) -> Result<()> {
		let primary = self.primary_path();
		self.write_table(&primary, state.records())?;

		let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
		let snapshot = self.snapshot_path(&stamp);
		self.write_table(&snapshot, state.records())?;

		info!(
			target = "previsao.store",
			records = state.len(),
			primary = %primary.display(),
			snapshot = %snapshot.display(),
			"tables written"
		);
		Ok(())
	}
}
