// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Sensitive word filtering over an AVL-tree backed character automaton
// Optional PyO3 bindings behind the `python` feature

// Allow non-local definitions for PyO3 macros (known issue with PyO3 0.20.x)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod tree;
pub mod word_filter;

pub use error::{FilterError, FilterResult};
pub use word_filter::{FilterAction, FilterConfig, FilterRegistry, Lifecycle, SensitiveWordFilter};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    use crate::word_filter::{FilterRegistry, SensitiveWordFilterRust};

    /// Replace the process-wide word list (takes effect after `reset`)
    #[pyfunction]
    fn set_sensitive_words(words: Vec<String>) {
        FilterRegistry::global().set_words(words);
    }

    #[pyfunction]
    fn get_sensitive_words() -> Vec<String> {
        FilterRegistry::global().words()
    }

    #[pyfunction]
    fn reset() {
        FilterRegistry::global().reset();
    }

    /// Shared filter built from the process-wide word list
    #[pyfunction]
    fn get_instance() -> SensitiveWordFilterRust {
        SensitiveWordFilterRust::from_shared(FilterRegistry::global().instance())
    }

    /// Python module: sensitive_word_filter
    ///
    /// # Examples
    ///
    /// ```python
    /// import sensitive_word_filter as swf
    ///
    /// swf.set_sensitive_words(["日本", "日本人", "韩国棒子"])
    /// word_filter = swf.get_instance()
    ///
    /// word_filter.exists("日本人")               # True
    /// word_filter.delete("东京日本人好")          # "东京人好"
    /// word_filter.shield("我爱日本国", "*")       # "我爱**国"
    /// word_filter.find("日本人在韩国棒子")        # ["日本", "韩国棒子"]
    /// ```
    #[pymodule]
    fn sensitive_word_filter(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
        m.add_class::<SensitiveWordFilterRust>()?;
        m.add_function(wrap_pyfunction!(set_sensitive_words, m)?)?;
        m.add_function(wrap_pyfunction!(get_sensitive_words, m)?)?;
        m.add_function(wrap_pyfunction!(reset, m)?)?;
        m.add_function(wrap_pyfunction!(get_instance, m)?)?;

        // Module metadata
        m.add("__version__", env!("CARGO_PKG_VERSION"))?;
        m.add(
            "__doc__",
            "Sensitive word detection, removal, masking and extraction",
        )?;

        Ok(())
    }
}
