// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::BTreeSet;

use crate::{
    error::{BuilderError, RangeEndpoint},
    quantifier::{
        Noun, DIGIT, NON_DIGIT, NON_WHITESPACE_CHAR, NON_WORD_CHAR, WHITESPACE_CHAR, WORD_CHAR,
    },
};

/// Escape sequences accepted inside a mixed character class.
pub const VALID_ESCAPE_SEQUENCES: [&str; 11] = [
    r"\d", r"\D", r"\w", r"\W", r"\s", r"\S", r"\t", r"\n", r"\r", r"\f", r"\v",
];

#[allow(clippy::enum_variant_names)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PresetCharSetName {
    CharDigit,
    CharNotDigit,
    CharWord,
    CharNotWord,
    CharSpace,
    CharNotSpace,
}

impl PresetCharSetName {
    pub fn code(&self) -> &'static str {
        match self {
            PresetCharSetName::CharDigit => r"\d",
            PresetCharSetName::CharNotDigit => r"\D",
            PresetCharSetName::CharWord => r"\w",
            PresetCharSetName::CharNotWord => r"\W",
            PresetCharSetName::CharSpace => r"\s",
            PresetCharSetName::CharNotSpace => r"\S",
        }
    }

    pub fn noun(&self) -> &'static Noun {
        match self {
            PresetCharSetName::CharDigit => &DIGIT,
            PresetCharSetName::CharNotDigit => &NON_DIGIT,
            PresetCharSetName::CharWord => &WORD_CHAR,
            PresetCharSetName::CharNotWord => &NON_WORD_CHAR,
            PresetCharSetName::CharSpace => &WHITESPACE_CHAR,
            PresetCharSetName::CharNotSpace => &NON_WHITESPACE_CHAR,
        }
    }
}

/// A character range whose endpoints have been checked.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CharRange {
    pub start: char,
    pub end_included: char,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CharCategory {
    Letter,
    Digit,
}

/// A non-fatal signal about a probably unintended character class.
#[derive(Debug, PartialEq, Clone)]
pub enum Advisory {
    /// The two endpoints of a range differ in letter-ness or digit-ness,
    /// e.g. `'0'-'z'` also covers the punctuation between them.
    CrossCategoryRange {
        start: char,
        end: char,
        category: CharCategory,
    },

    NonAsciiChars(Vec<char>),
}

impl CharRange {
    /// Checks that both endpoints are single characters and that `start`
    /// does not come after `end`. Cross-category ranges are allowed but
    /// reported through `advisories`.
    pub fn parse(
        start: &str,
        end: &str,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, BuilderError> {
        let start = single_char(start, RangeEndpoint::Start)?;
        let end = single_char(end, RangeEndpoint::End)?;

        if start > end {
            return Err(BuilderError::InvertedRange { start, end });
        }

        if start != end {
            if start.is_alphabetic() != end.is_alphabetic() {
                advisories.push(Advisory::CrossCategoryRange {
                    start,
                    end,
                    category: CharCategory::Letter,
                });
            }

            if start.is_numeric() != end.is_numeric() {
                advisories.push(Advisory::CrossCategoryRange {
                    start,
                    end,
                    category: CharCategory::Digit,
                });
            }
        }

        Ok(Self {
            start,
            end_included: end,
        })
    }

    /// The range as it appears inside a bracketed class, e.g. `a-z`.
    pub fn to_class_syntax(&self) -> String {
        let mut s = String::new();
        push_range_endpoint(&mut s, self.start);
        s.push('-');
        push_range_endpoint(&mut s, self.end_included);
        s
    }
}

fn single_char(value: &str, which: RangeEndpoint) -> Result<char, BuilderError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(BuilderError::RangeEndpointLength {
            which,
            value: value.to_owned(),
        }),
    }
}

fn push_range_endpoint(s: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        s.push('\\');
    }
    s.push(c);
}

/// Checks the chars set of a class and records an advisory for
/// non-ASCII members.
pub fn check_class_chars(chars: &str, advisories: &mut Vec<Advisory>) -> Result<(), BuilderError> {
    if chars.is_empty() {
        return Err(BuilderError::EmptyCharClass);
    }

    if chars.contains('\0') {
        return Err(BuilderError::NulInCharClass);
    }

    let non_ascii: Vec<char> = chars.chars().filter(|c| !c.is_ascii()).collect();
    if !non_ascii.is_empty() {
        advisories.push(Advisory::NonAsciiChars(non_ascii));
    }

    Ok(())
}

/// Escapes `chars` for use inside a bracketed class.
///
/// `]` and `\` are always escaped, as are `[`, `&` and `~`, which open
/// nested classes and set operations in the Rust dialect.
/// `^` is escaped only in the first position and `-` only strictly
/// inside the set. When `has_content_after` is true a trailing `-` is
/// escaped too, since a range or escape sequence follows it.
pub fn escape_class_chars(chars: &str, has_content_after: bool) -> String {
    let last = chars.chars().count().saturating_sub(1);
    let mut escaped = String::with_capacity(chars.len());

    for (idx, c) in chars.chars().enumerate() {
        let needs_escape = match c {
            ']' | '\\' | '[' | '&' | '~' => true,
            '^' => idx == 0,
            '-' => (idx > 0 && idx < last) || (idx == last && has_content_after),
            _ => false,
        };

        if needs_escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// The chars of a class deduplicated and sorted by code point,
/// as shown in explanations.
pub fn display_chars(chars: &str) -> String {
    chars.chars().collect::<BTreeSet<char>>().into_iter().collect()
}

pub fn check_escape_sequence(sequence: &str) -> Result<(), BuilderError> {
    if VALID_ESCAPE_SEQUENCES.contains(&sequence) {
        return Ok(());
    }

    let mut valid = VALID_ESCAPE_SEQUENCES.to_vec();
    valid.sort_unstable();

    Err(BuilderError::InvalidEscapeSequence {
        sequence: sequence.to_owned(),
        valid: valid.join(", "),
    })
}
