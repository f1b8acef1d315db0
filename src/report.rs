use crate::error::CheckError;
use crate::ErrorCount;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `records` as a JSON array of `{wrong, correct, counts}` objects,
/// replacing whatever is at `path`.
///
/// The report is written to a temporary file next to `path` and renamed into
/// place, so readers never observe a half-written report.
pub fn write_report(records: &[ErrorCount], path: &Path, pretty: bool) -> Result<(), CheckError> {
    let write_err = |e| CheckError::write(path, e);

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let result = if pretty {
            serde_json::to_writer_pretty(&mut writer, records)
        } else {
            serde_json::to_writer(&mut writer, records)
        };
        result.map_err(|e| write_err(e.into()))?;
        writer.flush().map_err(write_err)?;
    }

    temp_file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Read a report previously produced by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<ErrorCount>, CheckError> {
    let file = File::open(path).map_err(|e| CheckError::read(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CheckError::read(path, e.into()))
}

/// Render records the way they are written to disk.
pub fn to_json(records: &[ErrorCount], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}
