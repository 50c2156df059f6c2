//! Name utilities shared by the builder passes.

/// Make `name` usable as an identifier in any binding language.
///
/// Each run of characters that are not ASCII alphanumerics becomes a single
/// `_` when something alphanumeric follows it; a trailing run is dropped.
/// `operator ==` becomes `operator_`, `get_a::b` becomes `get_a_b`.
pub fn clean_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut last_invalid = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if last_invalid {
                result.push('_');
                last_invalid = false;
            }
            result.push(c);
        } else {
            last_invalid = true;
        }
    }
    result
}

/// Strip the leading `::` some scoped names carry.
#[inline]
pub fn descope(name: &str) -> &str {
    name.strip_prefix("::").unwrap_or(name)
}

#[inline]
pub fn trim_blanks(text: &str) -> &str {
    text.trim()
}

/// A four-character hash of `name`, drawn from `[A-Za-z0-9_]`.
///
/// Each byte is added in rotated left by a shift that advances by
/// `shift_offset` (mod 24) per byte. The 24-bit sum is scrambled with a
/// multiply by 4999 and spread six bits per output character. Different
/// offsets give independent hashes of the same name, which is how wrapper
/// name conflicts are broken.
pub fn hash_string(name: &str, shift_offset: u32) -> String {
    let mut hash: u32 = 0;
    let mut shift: u32 = 0;
    for &byte in name.as_bytes() {
        let c = u32::from(byte);
        let mut shifted = (c << shift) & 0xff_ffff;
        if shift > 16 {
            // Rotate, not shift: the high bits wrap around.
            shifted |= (c >> (24 - shift)) & 0xff;
        }
        hash = (hash + shifted) & 0xff_ffff;
        shift = (shift + shift_offset) % 24;
    }

    const PRIME: u64 = 4999;
    let product = u64::from(hash) * PRIME;
    let mut hash = (product ^ (product >> 24)) & 0xff_ffff;

    let mut result = String::with_capacity(4);
    for _ in 0..4 {
        let value = (hash & 0x3f) as u8;
        hash >>= 6;
        result.push(match value {
            0..=25 => char::from(b'A' + value),
            26..=51 => char::from(b'a' + value - 26),
            52..=61 => char::from(b'0' + value - 52),
            _ => '_',
        });
    }
    result
}

#[cfg(test)]
mod tests;
