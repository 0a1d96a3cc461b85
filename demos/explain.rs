// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_explain::{BuilderError, PatternBuilder, Quantity};
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<(), BuilderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    date()?;
    price()?;
    Ok(())
}

fn date() -> Result<(), BuilderError> {
    let mut builder = PatternBuilder::new();
    builder
        .start_anchor(false)
        .digits(Quantity::exact(4))?
        .literal("-", Quantity::none(), false)?
        .digits(Quantity::exact(2))?
        .literal("-", Quantity::none(), false)?
        .digits(Quantity::exact(2))?
        .end_anchor(false);

    println!("{}", builder);

    let re = builder.compile()?;
    println!("{}", re.is_match("2025-04-22")?); // should be true
    println!("{}", re.is_match("04-22")?); // should be false
    Ok(())
}

fn price() -> Result<(), BuilderError> {
    let mut currency = PatternBuilder::new();
    currency.char_class("$€", false, Quantity::none())?;

    let mut builder = PatternBuilder::new();
    builder
        .lookbehind(&currency)
        .digits(Quantity::one_or_more())?
        .start_group(false)
        .literal(".", Quantity::none(), false)?
        .digits(Quantity::exact(2))?
        .end_group(Quantity::zero_or_one())?
        // logs an advisory, '0'-'z' crosses from digits into letters
        .char_range("0", "z", true, Quantity::none())?
        .enable_ignorecase(true);

    println!("{}", builder);

    let re = builder.compile()?;
    for m in re.find_iter("coffee $3.50 , tea €2 , cake 4.00 ") {
        let m = m?;
        println!("{}..{} {}", m.start, m.end, m.as_str()); // "3.50 " and "2 "
    }
    Ok(())
}
