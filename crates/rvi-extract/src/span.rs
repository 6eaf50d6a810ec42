//! Offset-based span removal.
//!
//! Matched directive spans are collected as byte intervals and removed
//! in one pass by copying the gaps between them. Index-based slicing is
//! the only safe way to do this: search-and-replace would corrupt the
//! text whenever a matched substring recurs elsewhere.

use rvi_blocks::Block;

/// A matched directive span plus its parsed block. Transient: used only
/// inside one extraction pass to remove matched text without corrupting
/// offsets, never exposed outside the extractors.
pub(crate) struct DirectiveMatch {
    pub start: usize,
    pub end: usize,
    pub block: Block,
}

/// A kept region copied into the cleaned text: maps a cleaned offset
/// range back to its position in the original input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Gap {
    pub cleaned_start: usize,
    pub raw_start: usize,
    pub len: usize,
}

/// Remove the given `(start, end)` byte intervals from `text`.
///
/// Intervals are sorted by start; overlapping or out-of-range intervals
/// are skipped rather than honored, so a buggy scanner can never panic
/// here or eat unrelated text.
pub(crate) fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    remove_spans_mapped(text, spans).0
}

/// [`remove_spans`], additionally returning the kept-region map so
/// offsets into the cleaned text can be translated back to the input.
pub(crate) fn remove_spans_mapped(text: &str, spans: &[(usize, usize)]) -> (String, Vec<Gap>) {
    let mut sorted: Vec<(usize, usize)> = spans
        .iter()
        .copied()
        .filter(|&(start, end)| start < end && end <= text.len())
        .collect();
    sorted.sort_unstable_by_key(|&(start, _)| start);

    let mut out = String::with_capacity(text.len());
    let mut gaps = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = 0;
    for (start, end) in sorted {
        if start < cursor {
            continue;
        }
        push_gap(&mut gaps, &mut out, text, cursor, start);
        cursor = end;
    }
    push_gap(&mut gaps, &mut out, text, cursor, text.len());
    (out, gaps)
}

fn push_gap(gaps: &mut Vec<Gap>, out: &mut String, text: &str, raw_start: usize, raw_end: usize) {
    if raw_start >= raw_end {
        return;
    }
    gaps.push(Gap {
        cleaned_start: out.len(),
        raw_start,
        len: raw_end - raw_start,
    });
    out.push_str(&text[raw_start..raw_end]);
}

/// Translate an offset in the cleaned text back to the original input.
///
/// Positions past the last kept region clamp to the end of the input a
/// gap map was built from.
pub(crate) fn map_to_raw(gaps: &[Gap], cleaned_pos: usize) -> usize {
    for gap in gaps {
        if cleaned_pos < gap.cleaned_start + gap.len {
            let offset = cleaned_pos.saturating_sub(gap.cleaned_start);
            return gap.raw_start + offset;
        }
    }
    gaps.last().map_or(cleaned_pos, |gap| gap.raw_start + gap.len)
}

/// Collapse runs of three or more blank lines down to two and trim the
/// result.
///
/// Applied after span removal so a directive that occupied its own
/// paragraph does not leave a hole in the prose.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blanks = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            blanks += 1;
            if blanks > 2 {
                continue;
            }
            out.push('\n');
        } else {
            blanks = 0;
            out.push_str(line);
            out.push('\n');
        }
    }
    out.trim().to_owned()
}
