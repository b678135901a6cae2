use crate::{
    key::{Direction, KeyName, KeySpec, KeySpecError, SortKey},
    obs::sink::{self, MetricsEvent, OpKind},
    value::{Record, Value},
};

/// Normalize a raw key specification into canonical form.
///
/// Accepted shapes:
/// - a single field name (text, or a number/bool coerced to its rendering)
/// - a single `{name, order?}` descriptor record
/// - a list of either, in precedence order
///
/// A top-level `Null` or `Bool` and an empty list all mean "no keys".
pub fn canonicalize(raw: &Value) -> Result<KeySpec, KeySpecError> {
    canonicalize_raw(raw).inspect_err(|err| {
        sink::record(MetricsEvent::Failure {
            op: OpKind::Canonicalize,
            kind: err.kind(),
        });
    })
}

// Failures are left to the calling operation to record.
pub(super) fn canonicalize_raw(raw: &Value) -> Result<KeySpec, KeySpecError> {
    let keys = match raw {
        Value::Null | Value::Bool(_) => Vec::new(),
        Value::List(items) => canonicalize_items(items)?,
        single => canonicalize_items(std::slice::from_ref(single))?,
    };

    sink::record(MetricsEvent::Canonicalize {
        keys: keys.len() as u64,
    });

    Ok(KeySpec::new(keys))
}

fn canonicalize_items(items: &[Value]) -> Result<Vec<SortKey>, KeySpecError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| canonicalize_item(index, item))
        .collect()
}

fn canonicalize_item(index: usize, item: &Value) -> Result<SortKey, KeySpecError> {
    match item {
        Value::Record(descriptor) => canonicalize_descriptor(index, descriptor),
        Value::Null | Value::List(_) => Err(KeySpecError::InvalidKeyShape { index }),
        name => Ok(SortKey::new(key_name(index, name)?, Direction::Asc)),
    }
}

fn canonicalize_descriptor(index: usize, descriptor: &Record) -> Result<SortKey, KeySpecError> {
    let name = descriptor
        .get("name")
        .ok_or(KeySpecError::MissingFieldName { index })?;
    let name = key_name(index, name)?;

    let order = match descriptor.get("order") {
        None => Direction::Asc,
        Some(value) => {
            Direction::parse(value).ok_or_else(|| KeySpecError::InvalidOrderValue {
                index,
                value: value.clone(),
            })?
        }
    };

    Ok(SortKey::new(name, order))
}

// Scalar names only; a list or record cannot name a flat field.
fn key_name(index: usize, value: &Value) -> Result<KeyName, KeySpecError> {
    match value {
        Value::Text(name) => Ok(KeyName::Text(name.clone())),
        Value::Null => Ok(KeyName::Coerced("null".to_string())),
        Value::Bool(b) => Ok(KeyName::Coerced(b.to_string())),
        Value::Int(n) => Ok(KeyName::Coerced(n.to_string())),
        // -0.0 names the same field as 0
        Value::Float(f) if *f == 0.0 => Ok(KeyName::Coerced("0".to_string())),
        Value::Float(f) => Ok(KeyName::Coerced(f.to_string())),
        Value::List(_) | Value::Record(_) => Err(KeySpecError::InvalidKeyShape { index }),
    }
}

/// Inverse of the scalar rendering in `key_name`.
pub(super) fn parse_coerced(rendered: &str) -> Value {
    match rendered {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => rendered
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| rendered.parse::<f64>().map(Value::Float))
            .unwrap_or_else(|_| Value::Text(rendered.to_string())),
    }
}
