//! `data:<mime>;base64,<payload>` URIs, the transport form of every artifact.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::foundation::error::{BeastError, BeastResult};

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a base64 data URI into its mime type and decoded payload.
pub fn parse(uri: &str) -> BeastResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| BeastError::validation("data URI must start with 'data:'"))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| BeastError::validation("data URI must be base64 encoded"))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| BeastError::validation(format!("data URI payload: {e}")))?;
    Ok((mime.to_owned(), bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/data_uri.rs"]
mod tests;
