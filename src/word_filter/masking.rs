// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Output-rewriting scan handlers: removal and masking of detected words

use std::ops::ControlFlow;

use super::scanner::ScanHandler;

/// Drops matched words, copies everything else verbatim.
#[derive(Debug)]
pub struct DeleteHandler {
    output: String,
}

impl DeleteHandler {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
        }
    }
}

impl ScanHandler for DeleteHandler {
    type Output = String;

    fn on_match(&mut self, _word: &[char]) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn on_abandon(&mut self, partial: &[char]) {
        self.output.extend(partial);
    }

    fn on_passthrough(&mut self, c: char) {
        self.output.push(c);
    }

    fn finish(mut self, pending: &[char]) -> String {
        self.output.extend(pending);
        self.output
    }
}

/// Replaces every character of a matched word with `mask`.
#[derive(Debug)]
pub struct ShieldHandler {
    output: String,
    mask: char,
}

impl ShieldHandler {
    pub fn new(mask: char, capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            mask,
        }
    }
}

impl ScanHandler for ShieldHandler {
    type Output = String;

    fn on_match(&mut self, word: &[char]) -> ControlFlow<()> {
        self.output.extend(std::iter::repeat(self.mask).take(word.len()));
        ControlFlow::Continue(())
    }

    fn on_abandon(&mut self, partial: &[char]) {
        self.output.extend(partial);
    }

    fn on_passthrough(&mut self, c: char) {
        self.output.push(c);
    }

    fn finish(mut self, pending: &[char]) -> String {
        self.output.extend(pending);
        self.output
    }
}
