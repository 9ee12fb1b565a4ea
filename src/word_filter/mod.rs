// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Sensitive Word Filter
//
// Detection, removal, masking and extraction of configured words using:
// - A character automaton whose levels are AVL trees
// - A single-pass scanner with one character of backtrack
// - A lazily built, resettable registry of shared filter instances

pub mod automaton;
pub mod config;
pub mod detector;
pub mod masking;
pub mod registry;
pub mod scanner;

pub use config::{FilterAction, FilterConfig};
pub use detector::SensitiveWordFilter;
#[cfg(feature = "python")]
pub use detector::SensitiveWordFilterRust;
pub use registry::{FilterRegistry, Lifecycle};
