#[derive(Clone)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
}

/// Scan identifier characters (letters, digits, underscore) starting at
/// `start`, returning the end offset and the identifier text.
pub(super) fn scan_identifier(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    let mut idx = start;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    if idx == start {
        None
    } else {
        std::str::from_utf8(&bytes[start..idx])
            .ok()
            .map(|ident| (idx, ident))
    }
}

pub(super) fn starts_line_comment(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

pub(super) fn starts_block_comment(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn ends_block_comment(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}
