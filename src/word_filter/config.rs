// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the sensitive word filter

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// What `sanitize` does with a detected word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterAction {
    #[default]
    Shield, // Replace every character with the mask character
    Delete, // Remove entirely
}

impl FilterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAction::Shield => "shield",
            FilterAction::Delete => "delete",
        }
    }

    /// Unknown names fall back to the default action.
    pub fn parse(name: &str) -> Self {
        match name {
            "delete" => FilterAction::Delete,
            _ => FilterAction::Shield,
        }
    }
}

/// Configuration for the sensitive word filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub words: Vec<String>,

    // Masking configuration
    pub mask_char: char,
    pub default_action: FilterAction,

    // Behavior configuration
    pub log_detections: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            mask_char: '*',
            default_action: FilterAction::Shield,
            log_detections: true,
        }
    }
}

impl FilterConfig {
    /// Parse configuration from a JSON document
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FilterResult<()> {
        if self.mask_char.is_control() || self.mask_char.is_whitespace() {
            return Err(FilterError::invalid_argument(format!(
                "mask_char must be a visible character, got {:?}",
                self.mask_char
            )));
        }
        Ok(())
    }

    /// Extract configuration from Python dict
    #[cfg(feature = "python")]
    pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut config = Self::default();

        if let Some(value) = dict.get_item("words")? {
            config.words = value.extract()?;
        }

        if let Some(value) = dict.get_item("mask_char")? {
            config.mask_char = value.extract()?;
        }

        if let Some(value) = dict.get_item("default_action")? {
            let action: String = value.extract()?;
            config.default_action = FilterAction::parse(&action);
        }

        if let Some(value) = dict.get_item("log_detections")? {
            config.log_detections = value.extract()?;
        }

        config.validate()?;
        Ok(config)
    }
}
