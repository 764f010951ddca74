use std::fs;
use std::path::PathBuf;

use bsdf::codec::{BsdfError, Map, Result, Value, decode, encode};
use serde_json::Value as JsonValue;

use crate::cmd::util::{FileFormat, file_format};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
}

/// Convert between JSON and BSDF files; formats follow the file extensions.
///
/// The output file is only written once conversion succeeded.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output } = args;
	let from = file_format(&input)?;
	let to = file_format(&output)?;

	let raw = fs::read(&input)?;
	let value = match from {
		FileFormat::Json => {
			let json: JsonValue = serde_json::from_slice(&raw).map_err(|err| conversion(format!("invalid json in {}: {err}", input.display())))?;
			json_to_value(&json)?
		}
		FileFormat::Bsdf => decode(&raw, None)?,
	};

	let bytes = match to {
		FileFormat::Json => {
			let mut text = serde_json::to_vec(&value_to_json(&value)?).map_err(|err| conversion(err.to_string()))?;
			text.push(b'\n');
			text
		}
		FileFormat::Bsdf => encode(&value, None)?,
	};

	tracing::debug!(input = %input.display(), output = %output.display(), bytes = bytes.len(), "converted");
	fs::write(&output, bytes)?;
	println!("Wrote {}", output.display());
	Ok(())
}

/// Map JSON onto the value model; integers outside `i64` become floats.
pub(crate) fn json_to_value(json: &JsonValue) -> Result<Value> {
	let value = match json {
		JsonValue::Null => Value::Null,
		JsonValue::Bool(v) => Value::Bool(*v),
		JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
			(Some(v), _) => Value::Int64(v),
			(None, Some(v)) => Value::Float64(v),
			(None, None) => return Err(conversion(format!("JSON number {n} has no integer or float form"))),
		},
		JsonValue::String(v) => Value::Text(v.clone()),
		JsonValue::Array(items) => Value::List(items.iter().map(json_to_value).collect::<Result<_>>()?),
		JsonValue::Object(fields) => Value::Map(
			fields
				.iter()
				.map(|(key, item)| Ok((key.clone(), json_to_value(item)?)))
				.collect::<Result<Map>>()?,
		),
	};
	Ok(value)
}

/// Map a value onto JSON; blobs, host values and non-finite floats have no
/// JSON form.
pub(crate) fn value_to_json(value: &Value) -> Result<JsonValue> {
	let json = match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => JsonValue::Bool(*v),
		Value::UInt8(v) => serde_json::json!(v),
		Value::Int64(v) => serde_json::json!(v),
		Value::Float64(v) => serde_json::Number::from_f64(*v)
			.map(JsonValue::Number)
			.ok_or_else(|| conversion(format!("JSON cannot represent float {v}")))?,
		Value::Text(v) => JsonValue::String(v.clone()),
		Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect::<Result<_>>()?),
		Value::Map(fields) => JsonValue::Object(
			fields
				.iter()
				.map(|(key, item)| Ok((key.clone(), value_to_json(item)?)))
				.collect::<Result<_>>()?,
		),
		Value::Bytes(_) => return Err(conversion("JSON does not support binary blobs")),
		Value::Extended(host) => return Err(conversion(format!("JSON cannot represent host value {}", host.type_name()))),
	};
	Ok(json)
}

fn conversion(message: impl Into<String>) -> BsdfError {
	BsdfError::Conversion { message: message.into() }
}
