//! Turns untrusted text into a single path component that is safe on Linux, macOS and Windows.

/// Most filesystems cap a name at 255 bytes, not characters.
pub const NAME_MAX: usize = 255;

const INVALID_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes a name for use as a single file or folder name.
///
/// - Drops `< > : " / \ | ? *` and ASCII control characters
/// - Trims spaces at both ends and trailing dots
/// - Prefixes Windows device names (`CON`, `com1.txt`, ...) with `_`
/// - Limits the result to [`NAME_MAX`] bytes without splitting a character
///
/// An empty result means nothing usable survived and the caller has to treat it as an error.
pub fn sanitize_name(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| !(c.is_ascii_control() || INVALID_CHARS.contains(c)))
        .collect();

    let trimmed = trim_trailing(filtered.trim_matches(' '));
    if trimmed.is_empty() {
        return String::new();
    }

    let mut sanitized = if is_reserved(trimmed) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    };

    if sanitized.len() > NAME_MAX {
        let mut cut = NAME_MAX;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        let len = trim_trailing(&sanitized).len();
        sanitized.truncate(len);

        // Trimming can expose a bare device name, e.g. "CON" followed by a run of spaces.
        if is_reserved(&sanitized) {
            sanitized.insert(0, '_');
        }
    }

    sanitized
}

/// Like [`sanitize_name`] but for raw bytes that may not be valid UTF-8.
///
/// Malformed or truncated multi-byte sequences are dropped whole, valid characters around them are kept.
pub fn sanitize_name_bytes(bytes: &[u8]) -> String {
    let valid: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    sanitize_name(&valid)
}

fn trim_trailing(s: &str) -> &str {
    s.trim_end_matches(['.', ' '])
}

/// Device names are matched case-insensitively on the ASCII prefix, up to the first `.`.
fn is_reserved(name: &str) -> bool {
    let ascii_end = name.find(|c: char| !c.is_ascii()).unwrap_or(name.len());
    let ascii_prefix = &name[..ascii_end];
    let base = ascii_prefix.split('.').next().unwrap_or_default();
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
}
