//! Line splitting for raw log content
//!
//! Uploads are split on `\n` with an optional preceding `\r` stripped.
//! A final unterminated line is still a complete record - dropping it would
//! lose data, and it would also break hash reproducibility of the sanitized
//! artifact.

/// Split raw content into lines
///
/// Returns byte slices without their terminators. A trailing terminator does
/// not produce an empty final line; a final line without a terminator is
/// kept. Empty input yields no lines.
pub fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    let empty = data.is_empty();
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(move |_| !empty)
}

/// Whether the content ends with a line terminator
pub fn ends_with_terminator(data: &[u8]) -> bool {
    data.ends_with(b"\n")
}

#[cfg(test)]
#[path = "lines_test.rs"]
mod tests;
