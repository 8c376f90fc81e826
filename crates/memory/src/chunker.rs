//! Text chunking for retrieval indexing.
//!
//! Splits a document into overlapping windows of at most `chunk_size`
//! characters. Out-of-range parameters are normalized rather than rejected,
//! and the cursor always moves forward, so every call terminates within
//! `max_chunks + 5` iterations.

use std::fmt::Display;
use std::ops::Range;

pub const DEFAULT_CHUNK_SIZE: i64 = 900;
pub const DEFAULT_OVERLAP: i64 = 150;
pub const DEFAULT_MAX_CHUNKS: usize = 20_000;

/// Normalize raw chunking parameters into `(chunk_size, overlap)` with
/// `chunk_size >= 1` and `overlap < chunk_size`.
fn normalize(chunk_size: i64, overlap: i64) -> (usize, usize) {
    let chunk_size = if chunk_size <= 0 { DEFAULT_CHUNK_SIZE } else { chunk_size };
    let mut overlap = overlap.max(0);
    if overlap >= chunk_size {
        overlap = chunk_size / 5;
    }
    (chunk_size as usize, overlap as usize)
}

/// Character ranges of each chunk, in emission order.
pub fn chunk_spans(char_len: usize, chunk_size: i64, overlap: i64, max_chunks: usize) -> Vec<Range<usize>> {
    let (chunk_size, overlap) = normalize(chunk_size, overlap);
    let step = chunk_size - overlap;

    let iteration_cap = max_chunks.saturating_add(5);

    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut iterations = 0usize;

    while start < char_len && spans.len() < max_chunks {
        let end = start.saturating_add(chunk_size).min(char_len);
        spans.push(start..end);

        let mut next = start.saturating_add(step);
        if next <= start {
            next = start.saturating_add(chunk_size);
        }
        start = next;

        iterations += 1;
        if iterations > iteration_cap {
            break;
        }
    }

    spans
}

/// Split `text` into overlapping chunks of at most `chunk_size` characters.
///
/// * `chunk_size <= 0` falls back to [`DEFAULT_CHUNK_SIZE`].
/// * Negative `overlap` becomes 0; `overlap >= chunk_size` becomes
///   `chunk_size / 5`.
/// * At most `max_chunks` chunks are produced.
pub fn chunk_text(text: &str, chunk_size: i64, overlap: i64, max_chunks: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    // Byte offset of every char boundary, plus the end of the string.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    chunk_spans(char_len, chunk_size, overlap, max_chunks)
        .into_iter()
        .map(|span| text[boundaries[span.start]..boundaries[span.end]].to_string())
        .collect()
}

/// Chunk any displayable value by its textual representation.
pub fn chunk_display<T: Display + ?Sized>(
    value: &T,
    chunk_size: i64,
    overlap: i64,
    max_chunks: usize,
) -> Vec<String> {
    chunk_text(&value.to_string(), chunk_size, overlap, max_chunks)
}

/// Chunk with the default parameters (900 / 150 / 20000).
pub fn chunk_default(text: &str) -> Vec<String> {
    chunk_text(text, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, DEFAULT_MAX_CHUNKS)
}

/// Deterministic extractive summary.
///
/// Splits on `". "`, restores each sentence's trailing period, and keeps
/// whole sentences while the running word count stays within `max_words`.
/// The first sentence is always kept. Returns `None` when the text has no
/// sentences at all.
pub fn extractive_summary(text: &str, max_words: usize) -> Option<String> {
    let flattened = text.replace('\n', " ");
    let sentences: Vec<String> = flattened
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with('.') {
                s.to_string()
            } else {
                format!("{s}.")
            }
        })
        .collect();

    if sentences.is_empty() {
        return None;
    }

    let mut selected: Vec<&str> = Vec::new();
    let mut words = 0usize;
    for sentence in &sentences {
        let count = sentence.split_whitespace().count();
        if !selected.is_empty() && words + count > max_words {
            break;
        }
        selected.push(sentence);
        words += count;
    }

    Some(selected.join(" "))
}
