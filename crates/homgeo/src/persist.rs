//! JSON persistence for anything `Serialize` (primitives, frames, sample batches,
//! nested maps and vectors of them).
//!
//! Files are written with 4-space indentation and sorted object keys so that
//! diffs between runs stay readable.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Convert to a JSON value; keys end up sorted (`serde_json::Map` is ordered).
///
/// Values with no JSON form (e.g. maps keyed by non-strings) are an error
/// rather than being dropped.
pub fn to_json_value<T: Serialize + ?Sized>(obj: &T) -> Result<Value> {
    Ok(serde_json::to_value(obj)?)
}

/// Absolute, resolved path string for embedding paths in JSON documents.
pub fn path_value(path: &Path) -> Result<Value> {
    let resolved = path.canonicalize()?;
    Ok(Value::String(resolved.to_string_lossy().into_owned()))
}

pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, obj: &T) -> Result<()> {
    let value = to_json_value(obj)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer.flush()?;
    tracing::debug!(path = %path.as_ref().display(), "saved json");
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
