// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Bounded memo of Γ(z) for callers that evaluate the same arguments many times,
//! such as a simulation recomputing t densities for a fixed sample size.
//!
//! Keys are `z` rounded to six decimals. Once `capacity` entries are held the
//! cache stops inserting; nothing is evicted. Owned by a single caller.

use std::collections::HashMap;

use crate::config::{GAMMA_CACHE_CAPACITY, GAMMA_CACHE_KEY_DECIMALS};
use crate::kernels::scientific::distributions::shared::scalar::gamma_func;

#[derive(Debug, Clone)]
pub struct GammaCache {
    values: HashMap<i64, f64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for GammaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(GAMMA_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity.min(GAMMA_CACHE_CAPACITY)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    #[inline]
    fn key(z: f64) -> i64 {
        (z * 10f64.powi(GAMMA_CACHE_KEY_DECIMALS)).round() as i64
    }

    /// Γ(z), from the cache when the rounded key is present.
    pub fn gamma(&mut self, z: f64) -> f64 {
        if !z.is_finite() {
            return gamma_func(z);
        }
        let key = Self::key(z);
        if let Some(&v) = self.values.get(&key) {
            self.hits += 1;
            return v;
        }
        self.misses += 1;
        let v = gamma_func(z);
        if self.values.len() < self.capacity {
            self.values.insert(key, v);
        }
        v
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (hits, misses) since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
