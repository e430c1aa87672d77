//! Minimal CSV record writing.

use std::io::{self, Write};

/// Write one CSV record, quoting fields that need it.
///
/// A field is quoted when it contains a comma, a double quote, or a line
/// break; embedded quotes are doubled.
pub fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        if needs_quoting(field) {
            out.write_all(b"\"")?;
            out.write_all(field.replace('"', "\"\"").as_bytes())?;
            out.write_all(b"\"")?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\n")
}

fn needs_quoting(field: &str) -> bool {
    field.contains(['"', ',', '\n', '\r'])
}
