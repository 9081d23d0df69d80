use crate::error::{BookgraphError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

const CURSOR_PREFIX: &str = "cursor_";

/// Encode a primary-key position as an opaque cursor
pub fn encode_cursor(id: i64) -> String {
    BASE64.encode(format!("{}{}", CURSOR_PREFIX, id))
}

/// Decode a cursor back to the primary-key position it was built from
pub fn decode_cursor(cursor: &str) -> Result<i64> {
    let decoded = BASE64
        .decode(cursor)
        .map_err(|_| BookgraphError::MalformedCursor(format!("'{}' is not valid base64", cursor)))?;

    let payload = String::from_utf8(decoded)
        .map_err(|_| BookgraphError::MalformedCursor(format!("'{}' is not valid UTF-8", cursor)))?;

    let digits = payload.strip_prefix(CURSOR_PREFIX).ok_or_else(|| {
        BookgraphError::MalformedCursor(format!("'{}' lacks the cursor prefix", cursor))
    })?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BookgraphError::MalformedCursor(format!(
            "'{}' does not encode a decimal position",
            cursor
        )));
    }

    digits
        .parse()
        .map_err(|_| BookgraphError::MalformedCursor(format!("'{}' position is out of range", cursor)))
}

/// Cursor positioned before the first row
pub fn initial_cursor() -> String {
    encode_cursor(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip() {
        for id in [0, 1, 2, 100, 999_999, i64::MAX] {
            let cursor = encode_cursor(id);
            assert_eq!(decode_cursor(&cursor).unwrap(), id);
        }
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(encode_cursor(0), "Y3Vyc29yXzA=");
        assert_eq!(encode_cursor(2), "Y3Vyc29yXzI=");
    }

    #[test]
    fn test_initial_cursor_decodes_to_zero() {
        assert_eq!(decode_cursor(&initial_cursor()).unwrap(), 0);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let result = decode_cursor("not base64!");
        assert!(matches!(result, Err(BookgraphError::MalformedCursor(_))));
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        let cursor = BASE64.encode("offset:5");
        assert!(matches!(decode_cursor(&cursor), Err(BookgraphError::MalformedCursor(_))));
    }

    #[test]
    fn test_rejects_non_decimal_position() {
        for payload in ["cursor_", "cursor_-3", "cursor_+3", "cursor_12a", "cursor_ 1"] {
            let cursor = BASE64.encode(payload);
            assert!(
                matches!(decode_cursor(&cursor), Err(BookgraphError::MalformedCursor(_))),
                "{} should be rejected",
                payload
            );
        }
    }

    #[test]
    fn test_rejects_overflowing_position() {
        let cursor = BASE64.encode("cursor_99999999999999999999");
        assert!(matches!(decode_cursor(&cursor), Err(BookgraphError::MalformedCursor(_))));
    }

    #[test]
    fn test_rejects_non_utf8_payload() {
        let cursor = BASE64.encode([0xff, 0xfe, 0x00]);
        assert!(matches!(decode_cursor(&cursor), Err(BookgraphError::MalformedCursor(_))));
    }
}
