use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Translate the delimiter flag value into a byte. The two-character
/// literal `\t` is accepted as a tab for ease of shell quoting.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    if s == "\\t" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] => Ok(*b),
        _ => Err(anyhow!("delimiter must be a single character (or \\t): {s:?}")),
    }
}

/// Read every record from the file at `path`, or from stdin when no path
/// is given. Records of unequal field counts are a fatal error.
pub fn load(path: Option<&Path>, delimiter: u8) -> Result<Vec<Vec<String>>> {
    match path {
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("could not open file {}", p.display()))?;
            read_records(file, delimiter)
        }
        None => read_records(io::stdin(), delimiter),
    }
}

pub fn read_records<R: Read>(input: R, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_reader(input);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.context("could not read delimited input")?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    if records.is_empty() {
        return Err(anyhow!("input contains no records"));
    }

    Ok(records)
}
