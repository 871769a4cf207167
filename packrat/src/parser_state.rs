// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use crate::config::Config;
use crate::error::Error;
use crate::memo::{MemoStats, MemoStore};
use crate::parser::Parser;
use crate::position::Index;
use crate::result::{Expected, Failure, ParseResult, Success, Value};

#[derive(Debug)]
struct CallLimitTracker {
    current_call_limit: Option<(usize, usize)>,
}

impl CallLimitTracker {
    fn new(config: &Config) -> Self {
        CallLimitTracker {
            current_call_limit: config.call_limit.map(|limit| (0, limit.get())),
        }
    }

    fn limit_reached(&self) -> bool {
        self.current_call_limit
            .map_or(false, |(current, limit)| current >= limit)
    }

    fn increment_depth(&mut self) {
        if let Some((current, _)) = &mut self.current_call_limit {
            *current += 1;
        }
    }
}

/// The complete state of a parse session: the memo store plus the bookkeeping every parser
/// needs to reach. It is passed by `&mut` through every parser call, so independent sessions
/// never share anything.
#[derive(Debug)]
pub struct ParserState<'i, N> {
    memo: MemoStore<'i, N>,
    config: Config,
    call_tracker: CallLimitTracker,
    halted: Option<Error>,
}

/// Runs `entry` over the whole of `input` with the default [`Config`].
///
/// Returns `Ok` with the entry parser's result, or `Err` if the session was halted by a defect.
///
/// # Examples
///
/// ```
/// # use packrat::{state, literal};
/// let result = state::<(), _>("ab", literal("a")).unwrap();
///
/// assert_eq!(result.unwrap().rest, "b");
/// ```
///
/// [`Config`]: struct.Config.html
pub fn state<'i, N, P>(input: &'i str, entry: P) -> Result<ParseResult<'i, N>, Error>
where
    N: Clone,
    P: Parser<'i, N>,
{
    state_with(Config::default(), input, entry)
}

/// Runs `entry` over the whole of `input` starting at `(1, 1)`, setting up a fresh session
/// before and releasing it after, on every path.
pub fn state_with<'i, N, P>(
    config: Config,
    input: &'i str,
    entry: P,
) -> Result<ParseResult<'i, N>, Error>
where
    N: Clone,
    P: Parser<'i, N>,
{
    let mut state = ParserState::new(config);
    let result = entry.parse(&mut state, input, Index::start());

    match state.release() {
        (None, _) => Ok(result),
        (Some(error), _) => Err(error),
    }
}

impl<'i, N: Clone> ParserState<'i, N> {
    /// Sets up a session with an empty memo store.
    pub fn new(config: Config) -> Self {
        log::debug!(
            "setting up parse session (memoize: {}, call limit: {:?})",
            config.memoize,
            config.call_limit
        );

        ParserState {
            memo: MemoStore::setup(),
            config,
            call_tracker: CallLimitTracker::new(&config),
            halted: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memo(&self) -> &MemoStore<'i, N> {
        &self.memo
    }

    /// Returns the error that halted the session, if any.
    pub fn halted(&self) -> Option<&Error> {
        self.halted.as_ref()
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Halts the session and returns the failure every parser reports from now on. Only the
    /// first error is kept.
    pub fn halt(&mut self, error: Error, position: Index) -> Failure<'i, N> {
        if self.halted.is_none() {
            log::warn!("parse session halted: {}", error);
            self.halted = Some(error);
        }
        Failure::new(Expected::Aborted, position)
    }

    /// Counts one invocation against the call limit; fails with the aborted failure once the
    /// limit is reached or the session is already halted.
    #[inline]
    pub(crate) fn inc_call_check_limit(&mut self, position: Index) -> Result<(), Failure<'i, N>> {
        if self.is_halted() {
            return Err(Failure::new(Expected::Aborted, position));
        }
        if self.call_tracker.limit_reached() {
            return Err(self.halt(Error::CallLimitReached { position }, position));
        }
        self.call_tracker.increment_depth();
        Ok(())
    }

    /// Runs the named rule `raw` at `position`, going through the memo store. Equivalent to
    /// [`rule_with`] with the identity transform.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packrat::{Config, Index, ParserState, literal};
    /// let mut state = ParserState::<()>::new(Config::default());
    /// let first = state.rule("a", "ab", Index::start(), literal("a"));
    /// let second = state.rule("a", "ab", Index::start(), literal("a"));
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(state.memo().stats().hits, 1);
    /// ```
    ///
    /// [`rule_with`]: #method.rule_with
    #[inline]
    pub fn rule<P>(
        &mut self,
        name: &str,
        input: &'i str,
        position: Index,
        raw: P,
    ) -> ParseResult<'i, N>
    where
        P: Parser<'i, N>,
    {
        self.rule_with(name, input, position, raw, identity)
    }

    /// Runs the named rule `raw` at `position`, going through the memo store, and maps a
    /// successful value through `transform(value, position)` before caching it.
    ///
    /// `name` must identify the rule, not the call site: every call of the same rule at the same
    /// position shares one memo entry.
    pub fn rule_with<P, F>(
        &mut self,
        name: &str,
        input: &'i str,
        position: Index,
        raw: P,
        transform: F,
    ) -> ParseResult<'i, N>
    where
        P: Parser<'i, N>,
        F: FnOnce(Value<'i, N>, Index) -> Value<'i, N>,
    {
        self.inc_call_check_limit(position)?;

        if self.config.memoize {
            if let Some(cached) = self.memo.lookup(position, name) {
                log::trace!("memo hit: {} at {}", name, position);
                return cached;
            }
            log::trace!("memo miss: {} at {}", name, position);
        }

        // A halted session's results depend on where the limit hit, not on the input, so they
        // are never cached.
        let result = match raw.parse(self, input, position) {
            _ if self.is_halted() => return Err(Failure::new(Expected::Aborted, position)),
            Ok(Success {
                value,
                rest,
                position: end,
            }) => Ok(Success::new(transform(value, position), rest, end)),
            Err(failure) => Err(failure),
        };

        if self.config.memoize {
            self.memo.insert(position, name, result.clone());
        }

        result
    }

    /// Ends the session, returning the halting error, if any, and the memo counters.
    pub fn release(self) -> (Option<Error>, MemoStats) {
        let stats = self.memo.release();
        (self.halted, stats)
    }
}

/// The default rule transform: returns the matched value unchanged.
#[inline]
pub fn identity<'i, N>(value: Value<'i, N>, _position: Index) -> Value<'i, N> {
    value
}
