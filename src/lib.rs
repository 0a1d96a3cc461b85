// Copyright (c) 2024 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

mod builder;
mod charclass;
mod compiled;
mod error;
mod flags;
mod printer;
mod quantifier;

pub use builder::{Explainable, PatternBuilder};
pub use charclass::{Advisory, CharCategory, VALID_ESCAPE_SEQUENCES};
pub use compiled::{Captures, CompiledPattern, Match, Matches};
pub use error::{BuilderError, RangeEndpoint};
pub use flags::{Flag, Flags};
pub use quantifier::{Quantifier, Quantity, SpecialQuantifier};
