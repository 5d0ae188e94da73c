use std::io::{self, Write};

use rusqlite::types::Value;

use crate::export::table::ResultSet;

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Cell text for a SQL value. NULL is an empty cell.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, "{}", SEP)?;
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

/// Header row followed by every data row.
pub fn write_csv<W: Write>(mut w: W, result: &ResultSet) -> io::Result<()> {
    write_row(&mut w, &result.columns)?;
    for row in &result.rows {
        let cells: Vec<String> = row.iter().map(format_value).collect();
        write_row(&mut w, &cells)?;
    }
    Ok(())
}

#[cfg(test)]
pub fn to_csv_string(result: &ResultSet) -> String {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(&mut buf, result).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("cells are built from UTF-8 strings")
}
