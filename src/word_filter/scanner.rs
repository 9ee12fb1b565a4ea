// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Single-pass scanner driving the automaton over a character buffer
//
// The four public operations share one loop and differ only in how they
// react to a completed match, an abandoned partial match, and characters
// that are not part of any candidate match.

use std::ops::ControlFlow;

use super::automaton::{Automaton, Transitions};
use crate::error::{FilterError, FilterResult};

/// Cursor over the input with a single step of rewind.
#[derive(Debug)]
pub struct CharCursor<'a> {
    chars: &'a [char],
    last: char,
    position: usize,
}

impl<'a> CharCursor<'a> {
    /// Fails with `InvalidArgument` on an empty buffer.
    pub fn new(chars: &'a [char]) -> FilterResult<Self> {
        let last = *chars
            .last()
            .ok_or_else(|| FilterError::invalid_argument("text to scan must not be empty"))?;
        Ok(Self {
            chars,
            last,
            position: 0,
        })
    }

    /// Character at the cursor, advancing one position.
    ///
    /// At the end of input the last character is returned again and the
    /// cursor stays put.
    pub fn next_char(&mut self) -> char {
        match self.chars.get(self.position) {
            Some(&c) => {
                self.position += 1;
                c
            }
            None => self.last,
        }
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Step back one position, clamped at the start.
    pub fn back(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Per-operation reactions to scanner events.
pub trait ScanHandler {
    type Output;

    /// A configured word completed; `word` includes the final character.
    /// Returning `Break` stops the scan.
    fn on_match(&mut self, word: &[char]) -> ControlFlow<()>;

    /// A partial match failed; the failing character is rescanned afterwards.
    fn on_abandon(&mut self, partial: &[char]);

    /// A character that starts no candidate match.
    fn on_passthrough(&mut self, c: char);

    /// End of input (or an early stop); `pending` is any unfinished match.
    fn finish(self, pending: &[char]) -> Self::Output;
}

/// Run `handler` over `text`.
///
/// Shorter words win over longer words sharing their prefix: as soon as a
/// terminal state is reached the match is reported and scanning restarts
/// from the root at the next character.
pub fn scan<H: ScanHandler>(
    automaton: &Automaton,
    text: &[char],
    mut handler: H,
) -> FilterResult<H::Output> {
    let mut cursor = CharCursor::new(text)?;
    let root = automaton.root();
    let mut level: Option<&Transitions> = Some(root);
    let mut buffer: Vec<char> = Vec::new();

    loop {
        let c = cursor.next_char();

        match level.and_then(|transitions| transitions.search(&c)) {
            Some(state) if state.is_terminal() => {
                buffer.push(c);
                let flow = handler.on_match(&buffer);
                buffer.clear();
                level = Some(root);
                if flow.is_break() {
                    break;
                }
            }
            Some(state) => {
                buffer.push(c);
                level = state.next_states();
            }
            None if !buffer.is_empty() => {
                handler.on_abandon(&buffer);
                buffer.clear();
                cursor.back();
                level = Some(root);
            }
            None => handler.on_passthrough(c),
        }

        if cursor.is_end() {
            break;
        }
    }

    Ok(handler.finish(&buffer))
}

/// Stops at the first completed word.
#[derive(Debug, Default)]
pub struct ExistsHandler {
    found: bool,
}

impl ScanHandler for ExistsHandler {
    type Output = bool;

    fn on_match(&mut self, _word: &[char]) -> ControlFlow<()> {
        self.found = true;
        ControlFlow::Break(())
    }

    fn on_abandon(&mut self, _partial: &[char]) {}

    fn on_passthrough(&mut self, _c: char) {}

    fn finish(self, _pending: &[char]) -> bool {
        self.found
    }
}

/// Collects completed words in the order they were encountered.
#[derive(Debug, Default)]
pub struct FindHandler {
    words: Vec<String>,
}

impl ScanHandler for FindHandler {
    type Output = Vec<String>;

    fn on_match(&mut self, word: &[char]) -> ControlFlow<()> {
        self.words.push(word.iter().collect());
        ControlFlow::Continue(())
    }

    fn on_abandon(&mut self, _partial: &[char]) {}

    fn on_passthrough(&mut self, _c: char) {}

    fn finish(self, _pending: &[char]) -> Vec<String> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_cursor_rejects_empty_buffer() {
        let err = CharCursor::new(&[]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidArgument { .. }));
    }

    #[test]
    fn test_cursor_sticks_at_end() {
        let text = chars("ab");
        let mut cursor = CharCursor::new(&text).unwrap();
        assert_eq!(cursor.next_char(), 'a');
        assert!(!cursor.is_end());
        assert_eq!(cursor.next_char(), 'b');
        assert!(cursor.is_end());
        assert_eq!(cursor.next_char(), 'b');
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_cursor_back_clamps_at_zero() {
        let text = chars("xy");
        let mut cursor = CharCursor::new(&text).unwrap();
        cursor.back();
        assert_eq!(cursor.position(), 0);
        cursor.next_char();
        cursor.next_char();
        cursor.back();
        assert_eq!(cursor.next_char(), 'y');
    }

    #[test]
    fn test_exists_short_circuits() {
        let automaton = Automaton::build(["日本"]);
        let found = scan(&automaton, &chars("日本日本日本"), ExistsHandler::default()).unwrap();
        assert!(found);
        let found = scan(&automaton, &chars("日日"), ExistsHandler::default()).unwrap();
        assert!(!found);
    }

    #[test]
    fn test_find_prefix_wins() {
        let automaton = Automaton::build(["日本", "日本人", "韩国棒子"]);
        let words = scan(&automaton, &chars("日本人在韩国棒子"), FindHandler::default()).unwrap();
        assert_eq!(words, vec!["日本", "韩国棒子"]);
    }

    #[test]
    fn test_find_rescans_failing_character() {
        // "a" fails the "ab" path at the second "a", which then starts a fresh match
        let automaton = Automaton::build(["ab"]);
        let words = scan(&automaton, &chars("aab"), FindHandler::default()).unwrap();
        assert_eq!(words, vec!["ab"]);
    }

    #[test]
    fn test_find_backtracks_only_one_character() {
        // "abd" fails at "d"; "b" is not reconsidered so "bd" is missed
        let automaton = Automaton::build(["abc", "bd"]);
        let words = scan(&automaton, &chars("abd"), FindHandler::default()).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn test_find_duplicates_and_restart() {
        let automaton = Automaton::build(["aa"]);
        let words = scan(&automaton, &chars("aaaaa"), FindHandler::default()).unwrap();
        assert_eq!(words, vec!["aa", "aa"]);
    }

    #[test]
    fn test_scan_without_words() {
        let automaton = Automaton::build(Vec::<&str>::new());
        assert!(!scan(&automaton, &chars("text"), ExistsHandler::default()).unwrap());
        assert!(scan(&automaton, &chars("text"), FindHandler::default())
            .unwrap()
            .is_empty());
    }
}
