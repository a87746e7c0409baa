//! Hook payload intake.

use serde_json::Value;

use crate::error::InputError;
use crate::models::HookJson;
use crate::models::hook::REQUIRED_KEYS;
use crate::utils::read_stdin_limited;

/// Read and validate the hook payload from stdin.
pub fn read_hook(max_input_size: usize) -> Result<HookJson, InputError> {
    let bytes = read_stdin_limited(max_input_size)?.ok_or(InputError::TooLarge {
        limit: max_input_size,
    })?;
    parse_hook(&bytes, max_input_size)
}

/// Validate a raw payload: size ceiling, emptiness, JSON syntax, then the
/// required keys, reported by their dotted path as missing or not a string.
pub fn parse_hook(bytes: &[u8], max_input_size: usize) -> Result<HookJson, InputError> {
    if bytes.len() > max_input_size {
        return Err(InputError::TooLarge {
            limit: max_input_size,
        });
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(InputError::Empty);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    for (name, pointer) in REQUIRED_KEYS {
        match value.pointer(pointer) {
            None => return Err(InputError::MissingKey(name)),
            Some(v) if !v.is_string() => return Err(InputError::InvalidKey(name)),
            Some(_) => {}
        }
    }
    Ok(serde_json::from_value(value)?)
}
