// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Built filter instance and its optional PyO3 bindings

use log::info;
use sha2::{Digest, Sha256};

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
#[cfg(feature = "python")]
use std::sync::Arc;

use super::automaton::Automaton;
use super::config::{FilterAction, FilterConfig};
use super::masking::{DeleteHandler, ShieldHandler};
use super::scanner::{scan, ExistsHandler, FindHandler};
use crate::error::FilterResult;

/// Immutable pairing of a built automaton with the words that produced it.
///
/// A rebuild produces a new instance; an existing one is never mutated.
pub struct SensitiveWordFilter {
    automaton: Automaton,
    words: Vec<String>,
}

impl SensitiveWordFilter {
    pub fn new(words: Vec<String>) -> Self {
        let automaton = Automaton::build(&words);
        Self { automaton, words }
    }

    /// Snapshot of the word list this filter was built from
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// True as soon as any configured word occurs in `text`.
    ///
    /// Fails with `InvalidArgument` when `text` is empty.
    pub fn exists(&self, text: &str) -> FilterResult<bool> {
        let chars: Vec<char> = text.chars().collect();
        scan(&self.automaton, &chars, ExistsHandler::default())
    }

    /// `text` with every detected word removed.
    pub fn delete(&self, text: &str) -> FilterResult<String> {
        let chars: Vec<char> = text.chars().collect();
        scan(&self.automaton, &chars, DeleteHandler::with_capacity(text.len()))
    }

    /// `text` with every detected word replaced by `mask_char` repeated to
    /// the word's length.
    pub fn shield(&self, text: &str, mask_char: char) -> FilterResult<String> {
        let chars: Vec<char> = text.chars().collect();
        scan(
            &self.automaton,
            &chars,
            ShieldHandler::new(mask_char, text.len()),
        )
    }

    /// Detected words in order of occurrence, duplicates included.
    pub fn find(&self, text: &str) -> FilterResult<Vec<String>> {
        let chars: Vec<char> = text.chars().collect();
        scan(&self.automaton, &chars, FindHandler::default())
    }

    /// Apply the configured default action to `text`.
    pub fn sanitize(&self, text: &str, config: &FilterConfig) -> FilterResult<String> {
        if config.log_detections {
            let found = self.find(text)?;
            if !found.is_empty() {
                info!(
                    "Detected {} sensitive word(s), applying {}",
                    found.len(),
                    config.default_action.as_str()
                );
            }
        }

        match config.default_action {
            FilterAction::Shield => self.shield(text, config.mask_char),
            FilterAction::Delete => self.delete(text),
        }
    }

    /// SHA-256 hex digest of the word list, identifying this generation
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in &self.words {
            hasher.update(word.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Filter exposed to Python
///
/// # Example (Python)
/// ```python
/// from sensitive_word_filter import SensitiveWordFilterRust
///
/// word_filter = SensitiveWordFilterRust({"words": ["日本"], "mask_char": "*"})
/// word_filter.shield("我爱日本国")  # "我爱**国"
/// word_filter.find("日本人")        # ["日本"]
/// ```
#[cfg(feature = "python")]
#[pyclass]
pub struct SensitiveWordFilterRust {
    inner: Arc<SensitiveWordFilter>,
    config: FilterConfig,
}

#[cfg(feature = "python")]
impl SensitiveWordFilterRust {
    pub(crate) fn from_shared(inner: Arc<SensitiveWordFilter>) -> Self {
        Self {
            inner,
            config: FilterConfig::default(),
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl SensitiveWordFilterRust {
    /// Build a standalone filter
    ///
    /// # Configuration Keys
    /// * `words` (list[str]): Sensitive words
    /// * `mask_char` (str): Single mask character (default: "*")
    /// * `default_action` (str): "shield" or "delete", used by `sanitize`
    /// * `log_detections` (bool): Log detections made by `sanitize`
    #[new]
    pub fn new(config_dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let config = FilterConfig::from_py_dict(config_dict)?;
        let inner = Arc::new(SensitiveWordFilter::new(config.words.clone()));
        Ok(Self { inner, config })
    }

    pub fn exists(&self, text: &str) -> PyResult<bool> {
        Ok(self.inner.exists(text)?)
    }

    pub fn delete(&self, text: &str) -> PyResult<String> {
        Ok(self.inner.delete(text)?)
    }

    #[pyo3(signature = (text, mask_char=None))]
    pub fn shield(&self, text: &str, mask_char: Option<char>) -> PyResult<String> {
        let mask = mask_char.unwrap_or(self.config.mask_char);
        Ok(self.inner.shield(text, mask)?)
    }

    pub fn find(&self, text: &str) -> PyResult<Vec<String>> {
        Ok(self.inner.find(text)?)
    }

    pub fn sanitize(&self, text: &str) -> PyResult<String> {
        Ok(self.inner.sanitize(text, &self.config)?)
    }

    pub fn words(&self) -> Vec<String> {
        self.inner.words().to_vec()
    }

    pub fn fingerprint(&self) -> String {
        self.inner.fingerprint()
    }
}
