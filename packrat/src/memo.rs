// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Implementation of the packrat cache: every `(position, rule name)` pair that has been tried
//! in a session, successes and failures alike.

use std::collections::HashMap;

use serde::Serialize;

use crate::position::Index;
use crate::result::ParseResult;

/// Counters describing how a [`MemoStore`] was used over one session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MemoStats {
    pub hits: usize,
    pub misses: usize,
    pub inserts: usize,
    pub entries: usize,
}

/// Session-scoped memo of rule results keyed by `(position, name)`.
///
/// The input of a session never changes, so entries never go stale; the store only grows until
/// it is released.
#[derive(Debug)]
pub struct MemoStore<'i, N> {
    entries: HashMap<Index, HashMap<String, ParseResult<'i, N>>>,
    stats: MemoStats,
}

impl<'i, N: Clone> MemoStore<'i, N> {
    /// Allocates a fresh, empty store. Every call returns an independent store; nothing is
    /// shared between sessions.
    pub fn setup() -> Self {
        MemoStore {
            entries: HashMap::new(),
            stats: MemoStats::default(),
        }
    }

    /// Returns a copy of the result cached for `name` at `position`.
    pub fn lookup(&mut self, position: Index, name: &str) -> Option<ParseResult<'i, N>> {
        let found = self
            .entries
            .get(&position)
            .and_then(|rules| rules.get(name))
            .cloned();

        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        found
    }

    /// Caches `result` for `name` at `position`, replacing any earlier entry for the same key.
    pub fn insert(&mut self, position: Index, name: &str, result: ParseResult<'i, N>) {
        self.stats.inserts += 1;
        self.entries
            .entry(position)
            .or_default()
            .insert(name.to_owned(), result);
    }

    /// Returns the number of cached `(position, name)` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entries: self.len(),
            ..self.stats
        }
    }

    /// Frees every entry and ends the session, returning the final counters.
    pub fn release(self) -> MemoStats {
        let stats = self.stats();
        log::debug!(
            "releasing memo store: {} entries, {} hits, {} misses",
            stats.entries,
            stats.hits,
            stats.misses
        );
        stats
    }
}
