//! Day-section text parsing.
//!
//! The only markup-fragile piece of the pipeline: a day section's
//! rendered text carries labeled temperature lines, with the value on
//! the line immediately following each label. Everything upstream and
//! downstream works on the structured result.

/// Label preceding the minimum temperature value line.
pub const MIN_LABEL: &str = "Temperatura Mínima";
/// Label preceding the maximum temperature value line.
pub const MAX_LABEL: &str = "Temperatura Máxima";

/// Both temperatures extracted from one day section, raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReading {
	pub temp_min: String,
	pub temp_max: String,
}

/// Scans a day section's text for both temperature labels and takes
/// each value from the following line. Returns `None` unless both
/// values are present and non-empty; a day with a partial reading is
/// skipped rather than recorded.
pub fn parse_day(raw_text: &str) -> Option<DayReading> {
	let lines: Vec<&str> = raw_text.lines().collect();

	let mut temp_min = None;
	let mut temp_max = None;

	for (index, line) in lines.iter().enumerate() {
		if line.contains(MIN_LABEL) {
			temp_min = value_after(&lines, index);
		}
		if line.contains(MAX_LABEL) {
			temp_max = value_after(&lines, index);
		}
	}

	match (temp_min, temp_max) {
		(Some(min), Some(max)) => Some(DayReading { temp_min: min, temp_max: max }),
		_ => None,
	}
}

fn value_after(lines: &[&str], label_index: usize) -> Option<String> {
	let value = lines.get(label_index + 1)?.trim();
	(!value.is_empty()).then(|| value.to_string())
}
