use crate::error::{ExportError, Result};
use crate::scraper::{ReviewRecord, COLUMNS};
use std::io::{self, Write};

const SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes one comma-separated row terminated by `\n`.
pub fn write_row<'a, W, I>(mut w: W, cells: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Renders the header row followed by one row per record. The whole table
/// is built in memory; on error nothing is returned.
pub fn to_delimited_text(records: &[ReviewRecord]) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();

    write_row(&mut buf, COLUMNS).map_err(|e| ExportError::Write(e.to_string()))?;
    for record in records {
        write_row(&mut buf, record.row()).map_err(|e| ExportError::Write(e.to_string()))?;
    }

    String::from_utf8(buf).map_err(|e| ExportError::from(e).into())
}
