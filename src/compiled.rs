// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::Range;

use crate::{error::BuilderError, flags::Flags};

/// A pattern compiled together with its dialect flags.
///
/// The flags are applied as an inline group in front of the pattern,
/// `as_str` returns the pattern without them.
pub struct CompiledPattern {
    regex: fancy_regex::Regex,
    pattern: String,
    flags: Flags,
}

impl CompiledPattern {
    pub fn new(pattern: &str, flags: Flags) -> Result<Self, BuilderError> {
        let full = format!("{}{}", flags.inline_prefix(), pattern);
        tracing::debug!("compiling pattern: {}", full);

        let regex = fancy_regex::Regex::new(&full)?;

        Ok(CompiledPattern {
            regex,
            pattern: pattern.to_owned(),
            flags,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_match(&self, text: &str) -> Result<bool, BuilderError> {
        Ok(self.regex.is_match(text)?)
    }

    pub fn find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>, BuilderError> {
        Ok(self.regex.find(text)?.map(Match::from))
    }

    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        Matches {
            upstream: self.regex.find_iter(text),
        }
    }

    pub fn captures<'t>(&self, text: &'t str) -> Result<Option<Captures<'t>>, BuilderError> {
        let captures = self.regex.captures(text)?.map(|c| Captures {
            matches: c.iter().map(|m| m.map(Match::from)).collect(),
        });

        Ok(captures)
    }
}

pub struct Matches<'r, 't> {
    upstream: fancy_regex::Matches<'r, 't>,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Result<Match<'t>, BuilderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.upstream
            .next()
            .map(|item| item.map(Match::from).map_err(BuilderError::from))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Captures<'t> {
    // index 0 is the whole match, groups that did not participate are `None`
    pub matches: Vec<Option<Match<'t>>>,
}

impl<'t> Captures<'t> {
    pub fn get(&self, index: usize) -> Option<&Match<'t>> {
        self.matches.get(index).and_then(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Match<'t> {
    pub start: usize, // position included
    pub end: usize,   // position excluded
    pub value: &'t str,
}

impl<'t> Match<'t> {
    pub fn new(start: usize, end: usize, value: &'t str) -> Self {
        Match { start, end, value }
    }

    pub fn range(&self) -> Range<usize> {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    pub fn as_str(&self) -> &'t str {
        self.value
    }
}

impl<'t> From<fancy_regex::Match<'t>> for Match<'t> {
    fn from(m: fancy_regex::Match<'t>) -> Self {
        Match::new(m.start(), m.end(), m.as_str())
    }
}
