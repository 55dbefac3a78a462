//! Frame payload unwrapping
//!
//! Clients send frames as base64 text, optionally wrapped in a data URL
//! (`data:image/jpeg;base64,...`). This module only strips the wrapper and
//! decodes the base64 layer; interpreting the bytes is the provider's job.

use base64::Engine;

/// Split off a `data:<mime>;base64,` prefix if present.
///
/// Returns the mime type (if any) and the base64 body.
pub fn split_data_url(payload: &str) -> (Option<&str>, &str) {
    let trimmed = payload.trim();
    if let Some(rest) = trimmed.strip_prefix("data:") {
        if let Some((header, body)) = rest.split_once(',') {
            let mime = header.split(';').next().filter(|m| !m.is_empty());
            return (mime, body);
        }
    }
    // Anything after the first comma is the body, matching lenient clients
    // that send "<something>,<base64>" without the data: scheme.
    match trimmed.split_once(',') {
        Some((_, body)) => (None, body),
        None => (None, trimmed),
    }
}

/// Decode a frame payload into raw bytes
pub fn decode_payload(payload: &str) -> crate::Result<Vec<u8>> {
    let (_, body) = split_data_url(payload);
    if body.is_empty() {
        return Err(crate::Error::Decode("empty frame payload".to_string()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(body.as_bytes())
        .map_err(|e| crate::Error::Decode(format!("invalid base64 frame: {}", e)))
}

/// Encode raw bytes as a data URL, the inverse of [`decode_payload`]
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_url_with_mime() {
        let (mime, body) = split_data_url("data:image/jpeg;base64,QUJD");
        assert_eq!(mime, Some("image/jpeg"));
        assert_eq!(body, "QUJD");
    }

    #[test]
    fn test_split_plain_base64() {
        let (mime, body) = split_data_url("QUJD");
        assert!(mime.is_none());
        assert_eq!(body, "QUJD");
    }

    #[test]
    fn test_decode_payload_accepts_both_forms() {
        assert_eq!(decode_payload("QUJD").unwrap(), b"ABC");
        assert_eq!(decode_payload("data:application/json;base64,QUJD").unwrap(), b"ABC");
    }

    #[test]
    fn test_decode_payload_rejects_garbage() {
        let err = decode_payload("data:image/png;base64,@@@not base64@@@").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }

    #[test]
    fn test_decode_payload_rejects_empty_body() {
        assert!(matches!(
            decode_payload("data:image/png;base64,"),
            Err(crate::Error::Decode(_))
        ));
    }

    #[test]
    fn test_encode_then_decode_restores_bytes() {
        let url = encode_data_url("application/json", b"{\"hands\":[]}");
        assert!(url.starts_with("data:application/json;base64,"));
        assert_eq!(decode_payload(&url).unwrap(), b"{\"hands\":[]}");
    }
}
