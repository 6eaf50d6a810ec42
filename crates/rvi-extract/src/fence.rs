//! Fenced code region scanning.
//!
//! The JSON-block grammar accepts fenced code regions (backticks or
//! tildes, three or more) whose info string is a recognized JSON
//! language alias. CommonMark fence rules apply: the closing fence must
//! use the same character, be at least as long as the opening fence,
//! and carry nothing but trailing whitespace.

/// A fenced code region located in the scanned text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FencedRegion {
    /// Byte offset of the opening fence line.
    pub start: usize,
    /// Byte offset one past the closing fence line (including its
    /// newline when present).
    pub end: usize,
    /// Info string of the opening fence, trimmed.
    pub info: String,
    /// Lines between the fences, newline-joined.
    pub body: String,
}

/// Detect an opening fence on a line, returning `(char, len, info)`.
fn detect_fence(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let count = trimmed.chars().take_while(|&c| c == first).count();
    if count < 3 {
        return None;
    }
    Some((first, count, trimmed[count..].trim()))
}

/// Check whether a line closes a fence opened with `fence_char` of
/// `min_len` characters.
fn is_closing_fence(line: &str, fence_char: char, min_len: usize) -> bool {
    let trimmed = line.trim_start();
    let count = trimmed.chars().take_while(|&c| c == fence_char).count();
    count >= min_len && trimmed[count..].chars().all(char::is_whitespace)
}

/// Scan for complete fenced regions.
///
/// Unclosed fences are not regions; their text is left untouched.
pub(crate) fn scan_fenced_regions(text: &str) -> Vec<FencedRegion> {
    let mut regions = Vec::new();
    let mut offset = 0;
    let mut open: Option<(usize, char, usize, String, Vec<&str>)> = None;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let content = line.strip_suffix('\n').unwrap_or(line);

        match open.take() {
            None => {
                if let Some((ch, len, info)) = detect_fence(content) {
                    open = Some((line_start, ch, len, info.to_owned(), Vec::new()));
                }
            }
            Some((start, ch, len, info, mut body)) => {
                if is_closing_fence(content, ch, len) {
                    regions.push(FencedRegion {
                        start,
                        end: offset,
                        info,
                        body: body.join("\n"),
                    });
                } else {
                    body.push(content);
                    open = Some((start, ch, len, info, body));
                }
            }
        }
    }

    regions
}
