//! JSON device dump
//!
//! The dump is a pretty-printed array of objects with the fields `url`,
//! `brand`, `model`, `serial_code` and `misc_model`. Non-ASCII text is
//! written as UTF-8, not escaped.

use crate::extract::DeviceRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes the records as a pretty-printed JSON array
pub fn to_json_string(records: &[DeviceRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the records to `output_path`, replacing any existing file
///
/// # Arguments
///
/// * `records` - The extracted devices
/// * `output_path` - Destination of the dump
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the dump
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_json(records: &[DeviceRecord], output_path: &Path) -> OutputResult<()> {
    let json = to_json_string(records)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
