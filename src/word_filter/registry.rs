// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Lazily built, resettable filter registry
//
// One registry hands out one shared filter per generation. The filter is
// built on first request from the then-current word list; `reset` makes the
// next request build a fresh generation. Callers holding an older generation
// keep a valid filter.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use once_cell::sync::Lazy;

use super::detector::SensitiveWordFilter;

static GLOBAL: Lazy<FilterRegistry> = Lazy::new(FilterRegistry::new);

/// Readiness of the registry's current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Building,
    Ready,
}

impl Lifecycle {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Lifecycle::Building,
            2 => Lifecycle::Ready,
            _ => Lifecycle::Uninitialized,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Lifecycle::Uninitialized => 0,
            Lifecycle::Building => 1,
            Lifecycle::Ready => 2,
        }
    }
}

pub struct FilterRegistry {
    // Held for the whole build so at most one build runs at a time
    instance: Mutex<Option<Arc<SensitiveWordFilter>>>,
    words: Mutex<Vec<String>>,
    lifecycle: AtomicU8,
    generation: AtomicU64,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            instance: Mutex::new(None),
            words: Mutex::new(Vec::new()),
            lifecycle: AtomicU8::new(Lifecycle::Uninitialized.as_u8()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::new();
        registry.set_words(words);
        registry
    }

    /// Process-wide registry
    pub fn global() -> &'static FilterRegistry {
        &GLOBAL
    }

    /// Replace the configured word list. An empty list is ignored.
    ///
    /// Takes effect at the next build, i.e. after `reset`.
    pub fn set_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            warn!("Ignoring empty sensitive word list");
            return;
        }
        debug!("Configured {} sensitive words", words.len());
        *lock(&self.words) = words;
    }

    /// Copy of the configured word list
    pub fn words(&self) -> Vec<String> {
        lock(&self.words).clone()
    }

    /// Drop the current generation; the next `instance` call rebuilds.
    pub fn reset(&self) {
        let mut instance = lock(&self.instance);
        *instance = None;
        self.set_lifecycle(Lifecycle::Uninitialized);
        debug!("Filter registry reset");
    }

    /// Shared filter for the current generation, building it if needed.
    pub fn instance(&self) -> Arc<SensitiveWordFilter> {
        let mut instance = lock(&self.instance);
        if let Some(filter) = instance.as_ref() {
            return Arc::clone(filter);
        }

        self.set_lifecycle(Lifecycle::Building);
        let filter = Arc::new(SensitiveWordFilter::new(self.words()));
        *instance = Some(Arc::clone(&filter));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.set_lifecycle(Lifecycle::Ready);

        info!(
            "Published filter generation {} ({} words, fingerprint {})",
            generation,
            filter.words().len(),
            &filter.fingerprint()[..12]
        );
        filter
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_u8(self.lifecycle.load(Ordering::Acquire))
    }

    /// Number of generations built so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.lifecycle.store(lifecycle.as_u8(), Ordering::Release);
    }
}

// Guarded values are replaced wholesale, so a poisoned lock still holds a
// consistent value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
