// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::error::BuilderError;

/// A repetition request as the caller states it.
///
/// All four fields are optional and a request may be self-contradictory
/// (e.g. an exact count together with `+`). It is only ever consumed through
/// `Quantifier::try_from`, which either rejects it or turns it into
/// exactly one well-formed `Quantifier`.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Quantity {
    pub exact: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub special: Option<char>,
}

impl Quantity {
    /// No repetition, i.e. the token matches exactly once.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn exact(count: i64) -> Self {
        Self::none().with_exact(count)
    }

    pub fn min(count: i64) -> Self {
        Self::none().with_min(count)
    }

    pub fn max(count: i64) -> Self {
        Self::none().with_max(count)
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self::none().with_min(min).with_max(max)
    }

    pub fn special(symbol: char) -> Self {
        Self::none().with_special(symbol)
    }

    pub fn one_or_more() -> Self {
        Self::special('+')
    }

    pub fn zero_or_more() -> Self {
        Self::special('*')
    }

    pub fn zero_or_one() -> Self {
        Self::special('?')
    }

    pub fn with_exact(self, count: i64) -> Self {
        Self {
            exact: Some(count),
            ..self
        }
    }

    pub fn with_min(self, count: i64) -> Self {
        Self {
            min: Some(count),
            ..self
        }
    }

    pub fn with_max(self, count: i64) -> Self {
        Self {
            max: Some(count),
            ..self
        }
    }

    pub fn with_special(self, symbol: char) -> Self {
        Self {
            special: Some(symbol),
            ..self
        }
    }

    /// Builds a request from textual fields, e.g. the values of a web form.
    ///
    /// Blank fields count as absent. Numeric fields must parse as integers,
    /// the special field must be a single character.
    pub fn parse(
        exact: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
        special: Option<&str>,
    ) -> Result<Self, BuilderError> {
        let special = match special.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    // a multi-character symbol can never be a valid special quantifier
                    (Some(_), Some(_)) => {
                        return Err(BuilderError::InvalidSpecialQuantifier(text.to_owned()))
                    }
                    (None, _) => None,
                }
            }
            None => None,
        };

        Ok(Self {
            exact: parse_count(exact)?,
            min: parse_count(min)?,
            max: parse_count(max)?,
            special,
        })
    }
}

fn parse_count(text: Option<&str>) -> Result<Option<i64>, BuilderError> {
    match text.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| BuilderError::InvalidQuantity(s.to_owned())),
        None => Ok(None),
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SpecialQuantifier {
    OneOrMore,
    ZeroOrMore,
    ZeroOrOne,
}

impl SpecialQuantifier {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(SpecialQuantifier::OneOrMore),
            '*' => Some(SpecialQuantifier::ZeroOrMore),
            '?' => Some(SpecialQuantifier::ZeroOrOne),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            SpecialQuantifier::OneOrMore => '+',
            SpecialQuantifier::ZeroOrMore => '*',
            SpecialQuantifier::ZeroOrOne => '?',
        }
    }
}

/// A validated repetition. Invalid combinations are not representable.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Quantifier {
    Once,
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
    UpTo(usize),
    Special(SpecialQuantifier),
}

impl TryFrom<Quantity> for Quantifier {
    type Error = BuilderError;

    fn try_from(quantity: Quantity) -> Result<Self, Self::Error> {
        let Quantity {
            exact,
            min,
            max,
            special,
        } = quantity;

        if let Some(symbol) = special {
            if exact.is_some() || min.is_some() || max.is_some() {
                return Err(BuilderError::ConflictingQuantifier);
            }

            return SpecialQuantifier::from_symbol(symbol)
                .map(Quantifier::Special)
                .ok_or_else(|| BuilderError::InvalidSpecialQuantifier(symbol.to_string()));
        }

        let exact = exact.map(to_count).transpose()?;
        let min_count = min.map(to_count).transpose()?;
        let max_count = max.map(to_count).transpose()?;

        if let (Some(lo), Some(hi)) = (min, max) {
            if lo >= hi {
                return Err(BuilderError::MinNotLessThanMax { min: lo, max: hi });
            }
        }

        let quantifier = match (exact, min_count, max_count) {
            (Some(n), _, _) if n != 1 => Quantifier::Exact(n),
            (_, Some(lo), Some(hi)) => Quantifier::Between(lo, hi),
            (_, Some(lo), None) => Quantifier::AtLeast(lo),
            (_, None, Some(hi)) => Quantifier::UpTo(hi),
            _ => Quantifier::Once,
        };

        Ok(quantifier)
    }
}

fn to_count(value: i64) -> Result<usize, BuilderError> {
    if value <= 0 {
        return Err(BuilderError::NonPositiveQuantity(value));
    }

    usize::try_from(value).map_err(|_| BuilderError::InvalidQuantity(value.to_string()))
}

/// The singular and plural names of the unit a token matches,
/// e.g. "digit" / "digits".
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Noun {
    pub const fn new(singular: &'static str, plural: &'static str) -> Self {
        Self { singular, plural }
    }

    fn for_count(&self, count: usize) -> &'static str {
        if count == 1 {
            self.singular
        } else {
            self.plural
        }
    }
}

pub const DIGIT: Noun = Noun::new("digit", "digits");
pub const NON_DIGIT: Noun = Noun::new("non-digit character", "non-digit characters");
pub const WORD_CHAR: Noun = Noun::new("word character", "word characters");
pub const NON_WORD_CHAR: Noun = Noun::new("non-word character", "non-word characters");
pub const WHITESPACE_CHAR: Noun = Noun::new("whitespace character", "whitespace characters");
pub const NON_WHITESPACE_CHAR: Noun =
    Noun::new("non-whitespace character", "non-whitespace characters");
pub const LITERAL_STRING: Noun = Noun::new("literal string", "literal strings");
pub const GROUP: Noun = Noun::new("group", "groups");
pub const CLASS_CHAR: Noun = Noun::new("character from class", "characters from class");
pub const RANGE_CHAR: Noun = Noun::new("character from range", "characters from range");
pub const RANGES_CHAR: Noun = Noun::new("character from ranges", "characters from ranges");

impl Quantifier {
    pub fn is_once(&self) -> bool {
        matches!(self, Quantifier::Once)
    }

    /// The pattern suffix, empty for `Once`.
    pub fn syntax(&self) -> String {
        self.to_string()
    }

    /// The explanation phrase for this repetition of `noun`.
    pub fn describe(&self, noun: &Noun) -> String {
        match self {
            Quantifier::Once => format!("Exactly 1 {}", noun.singular),
            Quantifier::Exact(n) => format!("Exactly {} {}", n, noun.plural),
            Quantifier::Between(lo, hi) => format!("Between {} and {} {}", lo, hi, noun.plural),
            Quantifier::AtLeast(lo) => format!("At least {} {}", lo, noun.for_count(*lo)),
            Quantifier::UpTo(hi) => format!("Up to {} {}", hi, noun.for_count(*hi)),
            Quantifier::Special(SpecialQuantifier::OneOrMore) => {
                format!("One or more {}", noun.plural)
            }
            Quantifier::Special(SpecialQuantifier::ZeroOrMore) => {
                format!("Zero or more {}", noun.plural)
            }
            Quantifier::Special(SpecialQuantifier::ZeroOrOne) => {
                format!("Zero or one {}", noun.singular)
            }
        }
    }
}

/// Validates `quantity` and returns the pattern suffix together with
/// its explanation phrase.
pub fn resolve(quantity: Quantity, noun: &Noun) -> Result<(String, String), BuilderError> {
    let quantifier = Quantifier::try_from(quantity)?;
    Ok((quantifier.syntax(), quantifier.describe(noun)))
}
