//! Minimal CSV encoding.
//!
//! The output schema is four plain columns; only quoting for embedded
//! separators, quotes and newlines is needed, so the writer stays
//! std-only.

use std::io::{self, Write};

fn needs_quotes(field: &str) -> bool {
	field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes one CSV row to any writer, quoting fields as needed.
pub fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
	let mut first = true;
	for cell in row {
		if !first {
			write!(w, ",")?;
		} else {
			first = false;
		}
		if needs_quotes(cell) {
			let escaped = cell.replace('"', "\"\"");
			write!(w, "\"{}\"", escaped)?;
		} else {
			write!(w, "{}", cell)?;
		}
	}
	writeln!(w)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row_to_string(row: &[&str]) -> String {
		let mut buf = Vec::new();
		write_row(&mut buf, row).unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[test]
	fn plain_fields_are_unquoted() {
		assert_eq!(row_to_string(&["3300100", "2026-08-06", "14°C", "27°C"]), "3300100,2026-08-06,14°C,27°C\n");
	}

	#[test]
	fn separator_and_quote_fields_are_escaped() {
		assert_eq!(row_to_string(&["a,b", "c\"d"]), "\"a,b\",\"c\"\"d\"\n");
	}

	#[test]
	fn newline_in_field_is_quoted() {
		assert_eq!(row_to_string(&["a\nb"]), "\"a\nb\"\n");
	}
}
