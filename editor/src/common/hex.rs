use crate::error::EditorError;

/// Value of a hex digit character
#[inline]
pub(crate) fn hex_digit(ch: char) -> Option<u8> {
    ch.to_digit(16).map(|d| d as u8)
}

/// Character shown for `byte` in the text column
#[inline]
pub(crate) fn printable(byte: u8) -> char {
    if (0x20..0x7f).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Parse an offset given as decimal or `0x` prefixed hex
pub(crate) fn parse_offset(string: &str) -> Option<u64> {
    let string = string.trim();
    match string
        .strip_prefix("0x")
        .or_else(|| string.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => string.parse().ok(),
    }
}

/// Parse a search pattern. Input starting with `"` is taken as literal text,
/// a closing `"` is optional. Anything else is a hex byte string where
/// whitespace is ignored, for example `de ad beef`.
pub(crate) fn parse_pattern(input: &str) -> Result<Vec<u8>, EditorError> {
    if let Some(text) = input.strip_prefix('"') {
        let text = text.strip_suffix('"').unwrap_or(text);
        if text.is_empty() {
            return Err(EditorError::InvalidArgument("empty search pattern".into()));
        }
        return Ok(text.as_bytes().to_vec());
    }

    let digits = input
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            hex_digit(ch)
                .ok_or_else(|| EditorError::InvalidArgument(format!("not a hex digit '{}'", ch)))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if digits.is_empty() {
        return Err(EditorError::InvalidArgument("empty search pattern".into()));
    }

    if digits.len() % 2 != 0 {
        return Err(EditorError::InvalidArgument(format!(
            "odd number of hex digits in '{}'",
            input
        )));
    }

    Ok(digits
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
