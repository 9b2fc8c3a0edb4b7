//! Parses the `-f/--fixed` overrides file: a two-column CSV of
//! `name,value` rows, `value` one of `true`/`false`/`0`/`1`. Row order
//! is preserved so a later duplicate name simply overwrites an earlier
//! one when `apply_overrides` indexes by name.

use std::io::Read;

use crate::error::{IoError, Result};

fn malformed(msg: impl Into<String>) -> IoError {
    IoError::Core(sbgnq_core::Error::MalformedInput(msg.into()))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "TRUE" | "1" => Some(true),
        "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

pub fn read_overrides<R: Read>(reader: R) -> Result<Vec<(String, bool)>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() < 2 {
            return Err(malformed(format!("overrides row has fewer than two columns: {record:?}")));
        }
        let name = record[0].trim().to_string();
        let value = parse_bool(&record[1]).ok_or_else(|| malformed(format!("unrecognized boolean value {:?} for {name}", &record[1])))?;
        rows.push((name, value));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_rows() {
        let csv = "E,false\nS,true\n";
        let rows = read_overrides(csv.as_bytes()).unwrap();
        assert_eq!(rows, vec![("E".to_string(), false), ("S".to_string(), true)]);
    }

    #[test]
    fn rejects_unrecognized_boolean() {
        let csv = "E,maybe\n";
        assert!(read_overrides(csv.as_bytes()).is_err());
    }
}
