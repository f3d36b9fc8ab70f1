// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word extraction from corpus lines: maximal runs of word characters
//! (spec §3's token definition, §6's "nothing outside the word-character
//! regex is significant").

/// A word character: ASCII alphanumeric, or one of the nine Polish
/// diacritics in either case.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "ążęźćśóńłĄŻĘŹĆŚÓŃŁ".contains(c)
}

/// Extract maximal runs of word characters from `line`, in order.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in line.char_indices() {
        if is_word_char(c) {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(s) = start.take() {
            words.push(&line[s..idx]);
        }
    }
    if let Some(s) = start {
        words.push(&line[s..]);
    }

    words
}
