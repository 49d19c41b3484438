//! # File I/O Module
//!
//! Reading check inputs and writing results as JSON.
//!
//! - **Inputs**: a file holds either one [`SectionCheckInput`] object or an
//!   array of them (one entry per section/load combination)
//! - **Atomic saves**: results are written to a `.tmp` file, synced, then
//!   renamed over the target
//!
//! ## Example
//!
//! ```rust,no_run
//! use rcs_core::calculations::section_check::calculate;
//! use rcs_core::file_io::{load_inputs, save_results};
//! use std::path::Path;
//!
//! let inputs = load_inputs(Path::new("beam_101.json"))?;
//! let results = inputs.iter().map(calculate).collect::<Result<Vec<_>, _>>()?;
//! save_results(&results, Path::new("beam_101.out.json"))?;
//! # Ok::<(), rcs_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::calculations::section_check::SectionCheckInput;
use crate::errors::{CalcError, CalcResult};

/// Parse check inputs from JSON text: one object or an array of objects.
pub fn parse_inputs(json: &str) -> CalcResult<Vec<SectionCheckInput>> {
    let value: Value = serde_json::from_str(json)?;
    let inputs = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        _ => vec![serde_json::from_value(value)?],
    };
    Ok(inputs)
}

/// Load check inputs from a file.
///
/// # Returns
///
/// * `Ok(Vec<SectionCheckInput>)` - at least one input
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::SerializationError)` - invalid JSON or wrong shape
/// * `Err(CalcError::InvalidInput)` - the file holds an empty array
pub fn load_inputs(path: &Path) -> CalcResult<Vec<SectionCheckInput>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let inputs = parse_inputs(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    if inputs.is_empty() {
        return Err(CalcError::invalid_input(
            "inputs",
            "[]",
            format!("{} contains no sections to check", path.display()),
        ));
    }
    Ok(inputs)
}

/// Save any serializable value as pretty JSON with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp` and fsync
/// 3. Rename over `path`
pub fn save_results<T: Serialize + ?Sized>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);
    let tmp_error = |operation: &str, e: std::io::Error| {
        CalcError::file_error(operation, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(tmp_path).map_err(|e| tmp_error("create temp file", e))?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| tmp_error("write temp file", e))?;

    tmp_file.sync_all().map_err(|e| tmp_error("sync temp file", e))?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}
