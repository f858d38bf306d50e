//! Opaque pagination cursors.
//!
//! A cursor names the insertion sequence number of the last record on the
//! previous page. It is base64url-encoded so clients treat it as opaque.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::{StoreError, StoreResult};

const CURSOR_PREFIX: &str = "seq:";

/// Encode a sequence number as a cursor.
pub fn encode_cursor(seq: u64) -> String {
    URL_SAFE_NO_PAD.encode(format!("{CURSOR_PREFIX}{seq}"))
}

/// Decode a cursor back to the sequence number it names.
pub fn decode_cursor(cursor: &str) -> StoreResult<u64> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| StoreError::InvalidCursor)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| StoreError::InvalidCursor)?;
    text.strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or(StoreError::InvalidCursor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_opaque() {
        let cursor = encode_cursor(42);
        assert!(!cursor.contains("42"));
        assert_eq!(decode_cursor(&cursor).unwrap(), 42);
    }

    #[test]
    fn test_garbage_cursor_rejected() {
        assert_eq!(decode_cursor("!!not base64!!"), Err(StoreError::InvalidCursor));
    }

    #[test]
    fn test_cursor_without_prefix_rejected() {
        let forged = URL_SAFE_NO_PAD.encode("17");
        assert_eq!(decode_cursor(&forged), Err(StoreError::InvalidCursor));
    }

    #[test]
    fn test_cursor_with_non_numeric_seq_rejected() {
        let forged = URL_SAFE_NO_PAD.encode("seq:abc");
        assert_eq!(decode_cursor(&forged), Err(StoreError::InvalidCursor));
    }
}
