//! Stored file codec.
//!
//! The directory is stored as a pretty-printed JSON array of members. The
//! contents API transports file bodies as base64, and wraps long payloads
//! with line breaks, so decoding ignores whitespace.

use crate::error::CoreResult;
use crate::model::Member;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encodes members as pretty-printed JSON (two-space indent).
pub fn encode_members(members: &[Member]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(members)?)
}

/// Parses a JSON array of members.
pub fn decode_members(json: &str) -> CoreResult<Vec<Member>> {
    Ok(serde_json::from_str(json)?)
}

/// Encodes members as base64 of their pretty-printed JSON.
pub fn encode_content(members: &[Member]) -> CoreResult<String> {
    let json = encode_members(members)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decodes base64 file content back into members.
pub fn decode_content(content: &str) -> CoreResult<Vec<Member>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    let json = String::from_utf8(bytes)?;
    decode_members(&json)
}
