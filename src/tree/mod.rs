// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Generic balanced search tree
//
// The same tree serves as a plain ordered container and as the per-state
// transition table of the word filter automaton.

pub mod avl;
pub mod node;

pub use avl::{AvlTree, InOrder, OrderedTree};
pub use node::{DefaultNode, Link, Node, NodeFactory, NodeView};
