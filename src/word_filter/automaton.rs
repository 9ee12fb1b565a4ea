// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Character automaton built from the configured word list
// Each state owns an AVL tree of next-character transitions, so lookups cost
// O(log k) in the number of characters actually seen at that state.

use log::{debug, warn};

use crate::tree::{AvlTree, Link, Node, NodeFactory};

/// Transition table of one automaton level
pub type Transitions = AvlTree<StateNode, StateNodeFactory>;

/// Automaton state reached by consuming one character
pub struct StateNode {
    character: char,
    height: usize,
    terminal: bool,
    next_states: Option<Transitions>,
    left: Link<StateNode>,
    right: Link<StateNode>,
}

impl StateNode {
    pub fn new(character: char) -> Self {
        Self {
            character,
            height: 1,
            terminal: false,
            next_states: None,
            left: None,
            right: None,
        }
    }

    pub fn character(&self) -> char {
        self.character
    }

    /// A configured word ends exactly at this state
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Transitions out of this state; `None` until some word needs one
    pub fn next_states(&self) -> Option<&Transitions> {
        self.next_states.as_ref()
    }

    fn next_states_or_init(&mut self) -> &mut Transitions {
        self.next_states.get_or_insert_with(Transitions::default)
    }

    fn mark_terminal(&mut self) {
        self.terminal = true;
    }
}

impl Node for StateNode {
    type Value = char;

    fn value(&self) -> &char {
        &self.character
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }
}

// Nested transition tables are unlinked level by level; a long word would
// otherwise nest one drop frame per character.
impl Drop for StateNode {
    fn drop(&mut self) {
        let mut levels: Vec<Transitions> = self.next_states.take().into_iter().collect();
        while let Some(mut level) = levels.pop() {
            for mut state in level.drain_nodes() {
                levels.extend(state.next_states.take());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StateNodeFactory;

impl NodeFactory<StateNode> for StateNodeFactory {
    fn new_node(&self, character: char) -> StateNode {
        StateNode::new(character)
    }
}

/// Prefix automaton over the configured words
#[derive(Default)]
pub struct Automaton {
    root: Transitions,
    word_count: usize,
}

impl Automaton {
    /// Build the automaton; words sharing a prefix share its states.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut automaton = Self::default();
        let mut skipped = 0;

        for word in words {
            let chars: Vec<char> = word.as_ref().chars().collect();
            if chars.is_empty() {
                skipped += 1;
                continue;
            }
            insert_word(&mut automaton.root, &chars);
            automaton.word_count += 1;
        }

        if skipped > 0 {
            warn!("Skipped {} empty sensitive words", skipped);
        }
        debug!(
            "Built automaton from {} words ({} distinct first characters)",
            automaton.word_count,
            automaton.root.count()
        );

        automaton
    }

    /// Depth-0 transitions
    pub fn root(&self) -> &Transitions {
        &self.root
    }

    /// Number of non-empty words consumed by the build (duplicates included)
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// True when `word` is exactly one of the configured words
    pub fn contains_word(&self, word: &str) -> bool {
        let mut level = Some(&self.root);
        let mut last = None;
        for c in word.chars() {
            let state = match level.and_then(|transitions| transitions.search(&c)) {
                Some(state) => state,
                None => return false,
            };
            level = state.next_states();
            last = Some(state);
        }
        last.is_some_and(StateNode::is_terminal)
    }
}

fn insert_word(root: &mut Transitions, chars: &[char]) {
    let mut level = root;
    for (i, &c) in chars.iter().enumerate() {
        level.insert(c);
        let Some(state) = level.search_mut(&c) else {
            return;
        };
        if i + 1 == chars.len() {
            state.mark_terminal();
            return;
        }
        level = state.next_states_or_init();
    }
}
