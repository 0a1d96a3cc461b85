// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// A matching-behavior toggle applied when the pattern is compiled.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flag {
    IgnoreCase,
    Multiline,
    DotAll,
}

impl Flag {
    // in the order they appear in an inline flag group
    pub const ALL: [Flag; 3] = [Flag::IgnoreCase, Flag::Multiline, Flag::DotAll];

    pub fn name(&self) -> &'static str {
        match self {
            Flag::IgnoreCase => "IGNORECASE",
            Flag::Multiline => "MULTILINE",
            Flag::DotAll => "DOTALL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Flag::IgnoreCase => "Enables case-insensitive matching.",
            Flag::Multiline => "Makes ^ and $ match the start and end of each line.",
            Flag::DotAll => "Makes dot (.) match newline characters as well.",
        }
    }

    /// The letter of this flag in an inline group such as `(?im)`.
    pub fn inline_char(&self) -> char {
        match self {
            Flag::IgnoreCase => 'i',
            Flag::Multiline => 'm',
            Flag::DotAll => 's',
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Flag::IgnoreCase => 0b001,
            Flag::Multiline => 0b010,
            Flag::DotAll => 0b100,
        }
    }
}

/// The set of active flags. Setting a present flag or clearing an
/// absent one leaves the set unchanged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Flags {
    bits: u8,
}

impl Flags {
    pub fn set(&mut self, flag: Flag, enabled: bool) {
        if enabled {
            self.bits |= flag.bit();
        } else {
            self.bits &= !flag.bit();
        }
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.bits & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }

    /// The active flags as an inline group, e.g. `(?ms)`, or an
    /// empty string when no flag is active.
    pub fn inline_prefix(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let letters: String = self.iter().map(|flag| flag.inline_char()).collect();
        format!("(?{})", letters)
    }
}
