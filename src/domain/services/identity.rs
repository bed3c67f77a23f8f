#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::domain::models::SessionId;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Serialize)]
struct IdentityInput<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// 32 bit rolling hash (`hash * 31 + unit` over UTF-16 code units), returned
/// as the base-36 encoding of its absolute value. Not cryptographic.
pub fn hash_from_input(input: &str) -> String {
    let hash = input.encode_utf16().fold(0i32, |hash, unit| {
        return hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    });

    return to_base36(i64::from(hash).unsigned_abs());
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = vec![];
    while value > 0 {
        digits.push(char::from(BASE36_DIGITS[(value % 36) as usize]));
        value /= 36;
    }

    return digits.iter().rev().collect();
}

/// Serializes `{query, variables}` compactly with sorted object keys, so
/// equal inputs always produce the same text.
pub fn canonical_query(query: &str, variables: &Value) -> Result<String> {
    return Ok(serde_json::to_string(&IdentityInput { query, variables })?);
}

pub fn compute_session_id(query: &str, variables: &Value) -> Result<SessionId> {
    let canonical = canonical_query(query, variables)?;
    return Ok(SessionId::new(&hash_from_input(&canonical)));
}
