// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use thiserror::Error;

/// Errors raised by the token emitters of `PatternBuilder`.
///
/// Every variant is produced before the builder is touched, so a failed
/// call leaves the pattern and its explanation exactly as they were.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum BuilderError {
    #[error("Cannot use special quantifier along with quantity values.")]
    ConflictingQuantifier,

    #[error("Invalid special quantifier: '{0}', expected one of '+', '*' or '?'.")]
    InvalidSpecialQuantifier(String),

    #[error("Quantities must be valid integers, got: '{0}'.")]
    InvalidQuantity(String),

    #[error("Quantities cannot be equal to or less than zero, got: {0}.")]
    NonPositiveQuantity(i64),

    #[error("Minimum quantity ({min}) must be less than maximum quantity ({max}).")]
    MinNotLessThanMax { min: i64, max: i64 },

    #[error("Character class cannot be empty.")]
    EmptyCharClass,

    #[error("Ranges list cannot be empty.")]
    EmptyRanges,

    #[error("Null character (\\x00) is not allowed in character class.")]
    NulInCharClass,

    #[error("Range {which} must be a single character, got: '{value}' (length {})", char_count(.value))]
    RangeEndpointLength { which: RangeEndpoint, value: String },

    #[error(
        "Invalid range '{start}-{end}': start character '{start}' (U+{:04X}) must not be after end character '{end}' (U+{:04X}).",
        code_point(.start),
        code_point(.end)
    )]
    InvertedRange { start: char, end: char },

    #[error("Invalid escape sequence: '{sequence}'. Valid sequences for character classes are: {valid}")]
    InvalidEscapeSequence { sequence: String, valid: String },

    #[error("Failed to compile pattern: {0}")]
    Compile(String),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RangeEndpoint {
    Start,
    End,
}

impl std::fmt::Display for RangeEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeEndpoint::Start => f.write_str("start"),
            RangeEndpoint::End => f.write_str("end"),
        }
    }
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

fn code_point(c: &char) -> u32 {
    *c as u32
}

impl From<fancy_regex::Error> for BuilderError {
    fn from(e: fancy_regex::Error) -> Self {
        BuilderError::Compile(e.to_string())
    }
}
