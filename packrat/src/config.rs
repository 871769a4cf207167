// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::num::NonZeroUsize;

use serde::Deserialize;

/// Per-session settings of a [`ParserState`].
///
/// # Examples
///
/// ```
/// # use std::num::NonZeroUsize;
/// # use packrat::Config;
/// let config = Config::default().with_call_limit(NonZeroUsize::new(10_000));
///
/// assert!(config.memoize);
/// assert_eq!(config.call_limit.map(|l| l.get()), Some(10_000));
/// ```
///
/// [`ParserState`]: struct.ParserState.html
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The maximum number of rule and combinator invocations in one session, to prevent stack
    /// overflows or excessive execution times in some grammars. `None` means unlimited.
    pub call_limit: Option<NonZeroUsize>,
    /// Whether rule results are cached. Turning it off changes performance only, never results.
    pub memoize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            call_limit: None,
            memoize: true,
        }
    }
}

impl Config {
    pub fn with_call_limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.call_limit = limit;
        self
    }

    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn deserialize() {
        let config: Config =
            serde_json::from_str(r#"{ "call_limit": 500, "memoize": false }"#).unwrap();

        assert_eq!(config.call_limit, NonZeroUsize::new(500));
        assert!(!config.memoize);
    }

    #[test]
    fn deserialize_zero_limit() {
        assert!(serde_json::from_str::<Config>(r#"{ "call_limit": 0 }"#).is_err());
    }
}
