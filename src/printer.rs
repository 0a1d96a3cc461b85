// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use crate::{
    builder::PatternBuilder,
    charclass::{Advisory, CharCategory},
    flags::{Flag, Flags},
    quantifier::{Quantifier, SpecialQuantifier},
};

impl Display for SpecialQuantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantifier::Once => f.write_str(""),
            Quantifier::Exact(n) => write!(f, "{{{}}}", n),
            Quantifier::Between(lo, hi) => write!(f, "{{{},{}}}", lo, hi),
            Quantifier::AtLeast(lo) => write!(f, "{{{},}}", lo),
            Quantifier::UpTo(hi) => write!(f, "{{0,{}}}", hi),
            Quantifier::Special(s) => write!(f, "{}", s),
        }
    }
}

impl Display for CharCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharCategory::Letter => f.write_str("letter/non-letter"),
            CharCategory::Digit => f.write_str("digit/non-digit"),
        }
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::CrossCategoryRange {
                start,
                end,
                category,
            } => write!(
                f,
                "Range '{}-{}' crosses character types ({}). This may match unexpected characters.",
                start, end, category
            ),
            Advisory::NonAsciiChars(chars) => {
                let s: Vec<String> = chars.iter().map(|c| format!("'{}'", c)).collect();
                write!(
                    f,
                    "Non-ASCII characters detected: [{}]. Ensure the regex engine handles them as intended.",
                    s.join(", ")
                )
            }
        }
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|flag| flag.name()).collect();
        f.write_str(&names.join(" | "))
    }
}

impl Display for PatternBuilder {
    // for debug
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build())?;

        if !self.flags().is_empty() {
            write!(f, "  [{}]", self.flags())?;
        }

        for (idx, explanation) in self.explain().iter().enumerate() {
            write!(f, "\n{}. {}", idx + 1, explanation)?;
        }

        Ok(())
    }
}
