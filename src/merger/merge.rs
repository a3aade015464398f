use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::config::LineTerminator;
use crate::common::errors::MergeError;

/// Result of concatenating the merge inputs
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub bytes_written: u64,
    /// False when the first input was empty
    pub header_written: bool,
}

/// Concatenate `inputs`, in the order given, into `output`.
///
/// The first input is copied byte for byte, header row included. Every
/// later input is copied from the end of its first record onwards, so its
/// header is dropped and everything else (quoting, line endings, blank
/// lines) passes through untouched. When an input does not end in a
/// newline, `separator` is written before the next input's rows.
/// The output is truncated if it exists.
pub fn merge_csv_files(
    inputs: &[PathBuf],
    output: &Path,
    separator: LineTerminator,
) -> Result<MergeReport, MergeError> {
    let file = fs::File::create(output).map_err(|e| MergeError::io(output, e))?;
    let mut writer = BufWriter::new(file);

    let mut bytes_written = 0u64;
    let mut header_written = false;
    let mut at_line_start = true;

    for (index, input) in inputs.iter().enumerate() {
        let contents = fs::read(input).map_err(|e| MergeError::io(input, e))?;
        let start = if index == 0 {
            0
        } else {
            header_end(input, &contents)?
        };
        let body = &contents[start..];

        debug!(input = %input.display(), bytes = body.len(), "Appending CSV");
        if body.is_empty() {
            continue;
        }

        if !at_line_start {
            let sep = separator.as_bytes();
            writer.write_all(sep).map_err(|e| MergeError::io(output, e))?;
            bytes_written += sep.len() as u64;
        }

        writer.write_all(body).map_err(|e| MergeError::io(output, e))?;
        bytes_written += body.len() as u64;
        at_line_start = body.ends_with(b"\n");

        if index == 0 {
            header_written = true;
        }
    }

    writer.flush().map_err(|e| MergeError::io(output, e))?;

    Ok(MergeReport {
        output: output.to_path_buf(),
        inputs: inputs.to_vec(),
        bytes_written,
        header_written,
    })
}

/// Byte offset just past the first record of `contents`.
///
/// The csv reader finds the record end, so a quoted header spanning several
/// lines is skipped whole. Returns `contents.len()` when there is no record.
fn header_end(input: &Path, contents: &[u8]) -> Result<usize, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);

    let mut header = csv::ByteRecord::new();
    let found = reader
        .read_byte_record(&mut header)
        .map_err(|e| MergeError::csv(input, e))?;
    if !found {
        return Ok(contents.len());
    }

    let mut end = (reader.position().byte() as usize).min(contents.len());

    // The '\n' of a CRLF terminator may not have been consumed yet
    if end > 0 && contents[end - 1] == b'\r' && contents.get(end) == Some(&b'\n') {
        end += 1;
    }

    Ok(end)
}
