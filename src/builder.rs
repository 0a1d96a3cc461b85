// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    charclass::{
        check_class_chars, check_escape_sequence, display_chars, escape_class_chars, Advisory,
        CharRange, PresetCharSetName,
    },
    compiled::CompiledPattern,
    error::BuilderError,
    flags::{Flag, Flags},
    quantifier::{
        resolve, Noun, Quantifier, Quantity, CLASS_CHAR, GROUP, LITERAL_STRING, RANGES_CHAR,
        RANGE_CHAR,
    },
};

/// Anything that can be embedded in a lookaround: a pattern text plus
/// the explanation of each of its tokens.
pub trait Explainable {
    fn build(&self) -> String;
    fn explain(&self) -> Vec<String>;
}

/// Assembles a regular expression token by token, keeping a
/// human-readable explanation for each token.
///
/// Every emitter appends one pattern fragment (two for a quantified
/// `end_group`) and exactly one explanation, except `literal` with an
/// empty text which appends nothing. Failing emitters return before
/// anything is appended.
///
/// e.g.
///
/// ```
/// use regex_explain::{PatternBuilder, Quantity};
///
/// let mut builder = PatternBuilder::new();
/// builder
///     .start_anchor(false)
///     .digits(Quantity::exact(4))?
///     .literal("-", Quantity::none(), false)?
///     .digits(Quantity::between(1, 2))?
///     .end_anchor(false);
///
/// assert_eq!(builder.build(), r"\A\d{4}\-\d{1,2}\z");
/// assert_eq!(builder.explain()[1], "Exactly 4 digits");
/// # Ok::<(), regex_explain::BuilderError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PatternBuilder {
    fragments: Vec<String>,
    explanations: Vec<String>,
    flags: Flags,
    advisories: Vec<Advisory>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, fragment: String, explanation: String) -> &mut Self {
        self.fragments.push(fragment);
        self.explanations.push(explanation);
        self
    }

    fn commit_advisories(&mut self, advisories: Vec<Advisory>) {
        for advisory in advisories {
            tracing::warn!("{}", advisory);
            self.advisories.push(advisory);
        }
    }

    /// `^` when `multiline`, otherwise the start of the whole text `\A`.
    pub fn start_anchor(&mut self, multiline: bool) -> &mut Self {
        if multiline {
            self.push("^".to_owned(), "Start of line".to_owned())
        } else {
            self.push(r"\A".to_owned(), "Start of text".to_owned())
        }
    }

    /// `$` when `multiline`, otherwise the end of the whole text `\z`.
    pub fn end_anchor(&mut self, multiline: bool) -> &mut Self {
        if multiline {
            self.push("$".to_owned(), "End of line".to_owned())
        } else {
            self.push(r"\z".to_owned(), "End of text".to_owned())
        }
    }

    fn preset(
        &mut self,
        name: PresetCharSetName,
        quantity: Quantity,
    ) -> Result<&mut Self, BuilderError> {
        let (quantifier, explanation) = resolve(quantity, name.noun())?;
        Ok(self.push(format!("{}{}", name.code(), quantifier), explanation))
    }

    pub fn digits(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharDigit, quantity)
    }

    pub fn non_digits(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharNotDigit, quantity)
    }

    pub fn word_chars(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharWord, quantity)
    }

    pub fn non_word_chars(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharNotWord, quantity)
    }

    pub fn whitespace_chars(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharSpace, quantity)
    }

    pub fn non_whitespace_chars(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        self.preset(PresetCharSetName::CharNotSpace, quantity)
    }

    pub fn word_boundary(&mut self) -> &mut Self {
        self.push(r"\b".to_owned(), "Word boundary".to_owned())
    }

    pub fn non_word_boundary(&mut self) -> &mut Self {
        self.push(r"\B".to_owned(), "Non-word boundary".to_owned())
    }

    /// Matches `text` literally. An empty `text` is a no-op.
    ///
    /// A quantified text whose escaped form is longer than one character
    /// is wrapped in a group so that the quantifier applies to all of it,
    /// capturing or not according to `capturing`.
    pub fn literal(
        &mut self,
        text: &str,
        quantity: Quantity,
        capturing: bool,
    ) -> Result<&mut Self, BuilderError> {
        if text.is_empty() {
            return Ok(self);
        }

        let quantifier = Quantifier::try_from(quantity)?;
        let escaped = regex::escape(text);

        // an escaped metacharacter such as `\.` is two characters long
        let fragment = if quantifier.is_once() {
            escaped
        } else if escaped.chars().count() > 1 {
            if capturing {
                format!("({}){}", escaped, quantifier)
            } else {
                format!("(?:{}){}", escaped, quantifier)
            }
        } else {
            format!("{}{}", escaped, quantifier)
        };

        let explanation = if quantifier.is_once() {
            format!("\"{}\"", text)
        } else {
            format!("{}: \"{}\"", quantifier.describe(&LITERAL_STRING), text)
        };

        Ok(self.push(fragment, explanation))
    }

    pub fn start_group(&mut self, capturing: bool) -> &mut Self {
        if capturing {
            self.push("(".to_owned(), "Start of capturing group".to_owned())
        } else {
            self.push("(?:".to_owned(), "Start of non-capturing group".to_owned())
        }
    }

    /// Closes the current group. A quantifier becomes a fragment of its own
    /// right after the `)`.
    pub fn end_group(&mut self, quantity: Quantity) -> Result<&mut Self, BuilderError> {
        let quantifier = Quantifier::try_from(quantity)?;
        let phrase = quantifier.describe(&GROUP);

        self.fragments.push(")".to_owned());
        if quantifier.is_once() {
            // the phrase and the suffix are joined without a space,
            // giving "Exactly 1 groupand end of group"
            self.explanations.push(format!("{}and end of group", phrase));
        } else {
            self.fragments.push(quantifier.syntax());
            self.explanations.push(phrase);
        }

        Ok(self)
    }

    fn lookaround<E: Explainable + ?Sized>(
        &mut self,
        sub: &E,
        opening: &str,
        condition: &str,
    ) -> &mut Self {
        let pattern = sub.build();
        let items: Vec<String> = sub
            .explain()
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| item.to_owned())
            .collect();

        let description = if items.is_empty() {
            pattern.clone()
        } else {
            items.join("; ")
        };

        self.push(
            format!("{}{})", opening, pattern),
            format!("{} {}", condition, description),
        )
    }

    pub fn lookahead<E: Explainable + ?Sized>(&mut self, sub: &E) -> &mut Self {
        self.lookaround(sub, "(?=", "if followed by")
    }

    pub fn negative_lookahead<E: Explainable + ?Sized>(&mut self, sub: &E) -> &mut Self {
        self.lookaround(sub, "(?!", "if not followed by")
    }

    pub fn lookbehind<E: Explainable + ?Sized>(&mut self, sub: &E) -> &mut Self {
        self.lookaround(sub, "(?<=", "if preceded by")
    }

    pub fn negative_lookbehind<E: Explainable + ?Sized>(&mut self, sub: &E) -> &mut Self {
        self.lookaround(sub, "(?<!", "if not preceded by")
    }

    fn push_class(
        &mut self,
        body: &str,
        negated: bool,
        quantity: Quantity,
        noun: &Noun,
        description: String,
        advisories: Vec<Advisory>,
    ) -> Result<&mut Self, BuilderError> {
        let quantifier = Quantifier::try_from(quantity)?;

        let fragment = format!("[{}{}]{}", if negated { "^" } else { "" }, body, quantifier);
        let explanation = if quantifier.is_once() {
            description
        } else {
            format!("{}: {}", quantifier.describe(noun), description)
        };

        self.commit_advisories(advisories);
        Ok(self.push(fragment, explanation))
    }

    /// Any one of `chars`, or any character not among them when `negated`.
    pub fn char_class(
        &mut self,
        chars: &str,
        negated: bool,
        quantity: Quantity,
    ) -> Result<&mut Self, BuilderError> {
        let mut advisories = vec![];
        check_class_chars(chars, &mut advisories)?;

        let description = format!(
            "Any character {}in '{}'",
            not_prefix(negated),
            display_chars(chars)
        );

        self.push_class(
            &escape_class_chars(chars, false),
            negated,
            quantity,
            &CLASS_CHAR,
            description,
            advisories,
        )
    }

    /// Any character from `start` to `end` inclusive. Both bounds must be
    /// single characters and `start` must not come after `end`.
    pub fn char_range(
        &mut self,
        start: &str,
        end: &str,
        negated: bool,
        quantity: Quantity,
    ) -> Result<&mut Self, BuilderError> {
        let mut advisories = vec![];
        let range = CharRange::parse(start, end, &mut advisories)?;

        let description = format!(
            "Any character {}in range '{}' to '{}'",
            not_prefix(negated),
            range.start,
            range.end_included
        );

        self.push_class(
            &range.to_class_syntax(),
            negated,
            quantity,
            &RANGE_CHAR,
            description,
            advisories,
        )
    }

    pub fn char_ranges(
        &mut self,
        ranges: &[(&str, &str)],
        negated: bool,
        quantity: Quantity,
    ) -> Result<&mut Self, BuilderError> {
        if ranges.is_empty() {
            return Err(BuilderError::EmptyRanges);
        }

        let mut advisories = vec![];
        let ranges = parse_ranges(ranges, &mut advisories)?;

        let body: String = ranges.iter().map(|r| r.to_class_syntax()).collect();
        let description = format!(
            "Any character {}in ranges: {}",
            not_prefix(negated),
            describe_ranges(&ranges)
        );

        self.push_class(
            &body,
            negated,
            quantity,
            &RANGES_CHAR,
            description,
            advisories,
        )
    }

    /// A single class combining loose characters, ranges and escape
    /// sequences such as `\d`. At least one of the three must be non-empty.
    pub fn char_class_mixed(
        &mut self,
        chars: &str,
        ranges: &[(&str, &str)],
        escape_sequences: &[&str],
        negated: bool,
        quantity: Quantity,
    ) -> Result<&mut Self, BuilderError> {
        if chars.is_empty() && ranges.is_empty() && escape_sequences.is_empty() {
            return Err(BuilderError::EmptyCharClass);
        }

        let mut advisories = vec![];
        let mut body = String::new();
        let mut clauses = vec![];

        if !chars.is_empty() {
            check_class_chars(chars, &mut advisories)?;

            let has_content_after = !ranges.is_empty() || !escape_sequences.is_empty();
            body.push_str(&escape_class_chars(chars, has_content_after));
            clauses.push(format!("characters '{}'", display_chars(chars)));
        }

        if !ranges.is_empty() {
            let ranges = parse_ranges(ranges, &mut advisories)?;
            for range in &ranges {
                body.push_str(&range.to_class_syntax());
            }
            clauses.push(format!("ranges {}", describe_ranges(&ranges)));
        }

        if !escape_sequences.is_empty() {
            for sequence in escape_sequences {
                check_escape_sequence(sequence)?;
                body.push_str(sequence);
            }
            clauses.push(format!("escape sequences {}", escape_sequences.join(", ")));
        }

        let description = format!(
            "Any character {}matching: {}",
            not_prefix(negated),
            clauses.join(", ")
        );

        self.push_class(
            &body,
            negated,
            quantity,
            &CLASS_CHAR,
            description,
            advisories,
        )
    }

    pub fn build(&self) -> String {
        self.fragments.concat()
    }

    pub fn explain(&self) -> Vec<String> {
        self.explanations.clone()
    }

    /// Compiles the current pattern with the active flags. The builder
    /// itself is left unchanged.
    pub fn compile(&self) -> Result<CompiledPattern, BuilderError> {
        CompiledPattern::new(&self.build(), self.flags)
    }

    pub fn enable_multiline(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(Flag::Multiline, enabled);
        self
    }

    pub fn enable_ignorecase(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(Flag::IgnoreCase, enabled);
        self
    }

    pub fn enable_dotall(&mut self, enabled: bool) -> &mut Self {
        self.flags.set(Flag::DotAll, enabled);
        self
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Non-fatal findings recorded while building, e.g. a range from a
    /// digit to a letter.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// The number of tokens added so far.
    pub fn len(&self) -> usize {
        self.explanations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explanations.is_empty()
    }
}

impl Explainable for PatternBuilder {
    fn build(&self) -> String {
        PatternBuilder::build(self)
    }

    fn explain(&self) -> Vec<String> {
        PatternBuilder::explain(self)
    }
}

fn not_prefix(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

fn parse_ranges(
    ranges: &[(&str, &str)],
    advisories: &mut Vec<Advisory>,
) -> Result<Vec<CharRange>, BuilderError> {
    ranges
        .iter()
        .map(|(start, end)| CharRange::parse(start, end, advisories))
        .collect()
}

fn describe_ranges(ranges: &[CharRange]) -> String {
    let items: Vec<String> = ranges
        .iter()
        .map(|r| format!("'{}'-'{}'", r.start, r.end_included))
        .collect();
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        charclass::{Advisory, CharCategory},
        error::BuilderError,
        flags::Flag,
        quantifier::Quantity,
    };

    use super::{Explainable, PatternBuilder};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_anchors() {
        assert_eq!(PatternBuilder::new().start_anchor(true).build(), "^");
        assert_eq!(PatternBuilder::new().start_anchor(false).build(), r"\A");
        assert_eq!(PatternBuilder::new().end_anchor(true).build(), "$");
        assert_eq!(PatternBuilder::new().end_anchor(false).build(), r"\z");

        let mut builder = PatternBuilder::new();
        builder
            .start_anchor(true)
            .start_anchor(false)
            .end_anchor(true)
            .end_anchor(false);
        assert_eq!(
            builder.explain(),
            strings(&["Start of line", "Start of text", "End of line", "End of text"])
        );
    }

    #[test]
    fn test_preset_chars() {
        let mut builder = PatternBuilder::new();
        builder
            .digits(Quantity::exact(3))
            .unwrap()
            .non_digits(Quantity::none())
            .unwrap()
            .word_chars(Quantity::exact(2))
            .unwrap()
            .non_word_chars(Quantity::one_or_more())
            .unwrap()
            .whitespace_chars(Quantity::min(1))
            .unwrap()
            .non_whitespace_chars(Quantity::zero_or_one())
            .unwrap();

        assert_eq!(builder.build(), r"\d{3}\D\w{2}\W+\s{1,}\S?");
        assert_eq!(
            builder.explain(),
            strings(&[
                "Exactly 3 digits",
                "Exactly 1 non-digit character",
                "Exactly 2 word characters",
                "One or more non-word characters",
                "At least 1 whitespace character",
                "Zero or one non-whitespace character",
            ])
        );
    }

    #[test]
    fn test_digits_quantifiers() {
        let cases = [
            (Quantity::exact(3), r"\d{3}", "Exactly 3 digits"),
            (Quantity::between(2, 5), r"\d{2,5}", "Between 2 and 5 digits"),
            (Quantity::min(1), r"\d{1,}", "At least 1 digit"),
            (Quantity::max(4), r"\d{0,4}", "Up to 4 digits"),
            (Quantity::one_or_more(), r"\d+", "One or more digits"),
            (Quantity::zero_or_more(), r"\d*", "Zero or more digits"),
            (Quantity::zero_or_one(), r"\d?", "Zero or one digit"),
        ];

        for (quantity, pattern, explanation) in cases {
            let mut builder = PatternBuilder::new();
            builder.digits(quantity).unwrap();
            assert_eq!(builder.build(), pattern);
            assert_eq!(builder.explain(), strings(&[explanation]));
        }
    }

    #[test]
    fn test_boundaries() {
        let mut builder = PatternBuilder::new();
        builder
            .word_boundary()
            .literal("word", Quantity::none(), false)
            .unwrap()
            .non_word_boundary();

        assert_eq!(builder.build(), r"\bword\B");
        assert_eq!(
            builder.explain(),
            strings(&["Word boundary", "\"word\"", "Non-word boundary"])
        );
    }

    #[test]
    fn test_literal() {
        // grouped when quantified
        {
            let mut builder = PatternBuilder::new();
            builder.literal("ab", Quantity::exact(2), false).unwrap();
            assert_eq!(builder.build(), "(?:ab){2}");
            assert_eq!(
                builder.explain(),
                strings(&["Exactly 2 literal strings: \"ab\""])
            );

            let mut builder = PatternBuilder::new();
            builder.literal("ab", Quantity::exact(2), true).unwrap();
            assert_eq!(builder.build(), "(ab){2}");
        }

        // a plain single character or an unquantified text is never grouped,
        // an escaped metacharacter is
        {
            let mut builder = PatternBuilder::new();
            builder
                .literal("a", Quantity::one_or_more(), true)
                .unwrap()
                .literal(".", Quantity::zero_or_one(), false)
                .unwrap()
                .literal("abc", Quantity::none(), true)
                .unwrap();
            assert_eq!(builder.build(), r"a+(?:\.)?abc");
            assert_eq!(
                builder.explain(),
                strings(&[
                    "One or more literal strings: \"a\"",
                    "Zero or one literal string: \".\"",
                    "\"abc\"",
                ])
            );
        }

        // a quantified metacharacter keeps the requested capture group
        {
            let mut builder = PatternBuilder::new();
            builder.literal(".", Quantity::exact(2), true).unwrap();
            assert_eq!(builder.build(), r"(\.){2}");

            let re = builder.compile().unwrap();
            let captures = re.captures("a..b").unwrap().unwrap();
            assert_eq!(captures.len(), 2);
            assert_eq!(captures.get(0).map(|m| m.as_str()), Some(".."));
            assert_eq!(captures.get(1).map(|m| m.as_str()), Some("."));

            let mut builder = PatternBuilder::new();
            builder.literal(".", Quantity::one_or_more(), false).unwrap();
            assert_eq!(builder.build(), r"(?:\.)+");
            assert!(!builder.compile().unwrap().is_match("ab").unwrap());
        }

        // empty text is a no-op
        {
            let mut builder = PatternBuilder::new();
            builder.literal("", Quantity::exact(3), false).unwrap();
            assert_eq!(builder.build(), "");
            assert!(builder.is_empty());
        }
    }

    #[test]
    fn test_literal_escaping() {
        let mut builder = PatternBuilder::new();
        builder
            .literal(r"test.*+?[]{}()^$|\", Quantity::none(), false)
            .unwrap();

        let pattern = builder.build();
        assert_eq!(pattern, r"test\.\*\+\?\[\]\{\}\(\)\^\$\|\\");

        let re = builder.compile().unwrap();
        assert!(re.is_match(r"a test.*+?[]{}()^$|\ b").unwrap());
        assert!(!re.is_match("testxx").unwrap());
    }

    #[test]
    fn test_groups() {
        let mut builder = PatternBuilder::new();
        builder
            .start_group(true)
            .literal("abc", Quantity::none(), false)
            .unwrap()
            .end_group(Quantity::exact(2))
            .unwrap()
            .start_group(false)
            .digits(Quantity::one_or_more())
            .unwrap()
            .end_group(Quantity::zero_or_one())
            .unwrap();

        assert_eq!(builder.build(), r"(abc){2}(?:\d+)?");
        assert_eq!(
            builder.explain(),
            strings(&[
                "Start of capturing group",
                "\"abc\"",
                "Exactly 2 groups",
                "Start of non-capturing group",
                "One or more digits",
                "Zero or one group",
            ])
        );
    }

    #[test]
    fn test_end_group_without_quantifier() {
        let mut builder = PatternBuilder::new();
        builder
            .start_group(false)
            .word_chars(Quantity::none())
            .unwrap()
            .end_group(Quantity::none())
            .unwrap();

        assert_eq!(builder.build(), r"(?:\w)");
        assert_eq!(builder.explain()[2], "Exactly 1 groupand end of group");
    }

    #[test]
    fn test_lookarounds() {
        let mut sub = PatternBuilder::new();
        sub.digits(Quantity::exact(3)).unwrap();

        // positive lookahead
        {
            let mut builder = PatternBuilder::new();
            builder.lookahead(&sub);
            assert_eq!(builder.build(), r"(?=\d{3})");
            assert_eq!(
                builder.explain(),
                strings(&["if followed by Exactly 3 digits"])
            );
        }

        // all four kinds
        {
            let mut sub = PatternBuilder::new();
            sub.literal("test", Quantity::none(), false)
                .unwrap()
                .digits(Quantity::none())
                .unwrap();

            let mut builder = PatternBuilder::new();
            builder
                .lookahead(&sub)
                .negative_lookahead(&sub)
                .lookbehind(&sub)
                .negative_lookbehind(&sub);

            assert_eq!(
                builder.build(),
                r"(?=test\d)(?!test\d)(?<=test\d)(?<!test\d)"
            );
            assert_eq!(
                builder.explain(),
                strings(&[
                    "if followed by \"test\"; Exactly 1 digit",
                    "if not followed by \"test\"; Exactly 1 digit",
                    "if preceded by \"test\"; Exactly 1 digit",
                    "if not preceded by \"test\"; Exactly 1 digit",
                ])
            );
        }

        // the sub-expression is left untouched
        assert_eq!(sub.build(), r"\d{3}");
        assert_eq!(sub.len(), 1);
    }

    struct RawExpression {
        pattern: &'static str,
        explanations: Vec<String>,
    }

    impl Explainable for RawExpression {
        fn build(&self) -> String {
            self.pattern.to_owned()
        }

        fn explain(&self) -> Vec<String> {
            self.explanations.clone()
        }
    }

    #[test]
    fn test_lookaround_explanation_fallback() {
        // blank explanations fall back to the pattern text
        {
            let sub = RawExpression {
                pattern: r"\d{2}",
                explanations: strings(&["", "   "]),
            };

            let mut builder = PatternBuilder::new();
            builder.lookahead(&sub);
            assert_eq!(builder.build(), r"(?=\d{2})");
            assert_eq!(builder.explain(), strings(&[r"if followed by \d{2}"]));
        }

        // entries are trimmed and blanks skipped
        {
            let sub = RawExpression {
                pattern: "ab",
                explanations: strings(&[" first ", "", "second\n"]),
            };

            let mut builder = PatternBuilder::new();
            builder.negative_lookbehind(&sub);
            assert_eq!(
                builder.explain(),
                strings(&["if not preceded by first; second"])
            );
        }
    }

    #[test]
    fn test_char_class() {
        let mut builder = PatternBuilder::new();
        builder
            .char_class("aeiou", false, Quantity::none())
            .unwrap()
            .char_class("cba", true, Quantity::exact(2))
            .unwrap();

        assert_eq!(builder.build(), "[aeiou][^cba]{2}");
        assert_eq!(
            builder.explain(),
            strings(&[
                "Any character in 'aeiou'",
                "Exactly 2 characters from class: Any character NOT in 'abc'",
            ])
        );
    }

    #[test]
    fn test_char_class_escaping() {
        let mut builder = PatternBuilder::new();
        builder
            .char_class(r"^a-b]\", false, Quantity::none())
            .unwrap()
            .char_class("-x-", false, Quantity::none())
            .unwrap();

        assert_eq!(builder.build(), r"[\^a\-b\]\\][-x-]");

        let re = builder.compile().unwrap();
        assert!(re.is_match("^-").unwrap());
        assert!(re.is_match(r"\x").unwrap());
        assert!(!re.is_match("cx").unwrap());
    }

    #[test]
    fn test_char_class_errors() {
        let mut builder = PatternBuilder::new();
        assert_eq!(
            builder.char_class("", false, Quantity::none()),
            Err(BuilderError::EmptyCharClass)
        );
        assert_eq!(
            builder.char_class("a\0", false, Quantity::none()),
            Err(BuilderError::NulInCharClass)
        );
        assert_eq!(
            builder.char_class_mixed("", &[], &[], false, Quantity::none()),
            Err(BuilderError::EmptyCharClass)
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn test_char_range() {
        let mut builder = PatternBuilder::new();
        builder
            .char_range("a", "z", false, Quantity::none())
            .unwrap()
            .char_range("0", "9", true, Quantity::between(1, 3))
            .unwrap()
            .char_range("a", "a", false, Quantity::none())
            .unwrap();

        assert_eq!(builder.build(), "[a-z][^0-9]{1,3}[a-a]");
        assert_eq!(
            builder.explain(),
            strings(&[
                "Any character in range 'a' to 'z'",
                "Between 1 and 3 characters from range: Any character NOT in range '0' to '9'",
                "Any character in range 'a' to 'a'",
            ])
        );
        assert!(builder.advisories().is_empty());

        assert_eq!(
            builder.char_range("z", "a", false, Quantity::none()),
            Err(BuilderError::InvertedRange {
                start: 'z',
                end: 'a'
            })
        );
        assert!(matches!(
            builder.char_range("ab", "z", false, Quantity::none()),
            Err(BuilderError::RangeEndpointLength { .. })
        ));
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_char_range_advisory() {
        let mut builder = PatternBuilder::new();
        builder
            .char_range("9", "A", false, Quantity::none())
            .unwrap();

        // emitted as requested
        assert_eq!(builder.build(), "[9-A]");
        assert_eq!(
            builder.advisories(),
            &[
                Advisory::CrossCategoryRange {
                    start: '9',
                    end: 'A',
                    category: CharCategory::Letter
                },
                Advisory::CrossCategoryRange {
                    start: '9',
                    end: 'A',
                    category: CharCategory::Digit
                },
            ]
        );

        // a failed call records nothing
        let mut builder = PatternBuilder::new();
        assert!(builder
            .char_ranges(&[("0", "z"), ("b", "a")], false, Quantity::none())
            .is_err());
        assert!(builder.advisories().is_empty());
    }

    #[test]
    fn test_char_ranges() {
        let mut builder = PatternBuilder::new();
        builder
            .char_ranges(&[("a", "z"), ("A", "Z"), ("0", "9")], false, Quantity::one_or_more())
            .unwrap();

        assert_eq!(builder.build(), "[a-zA-Z0-9]+");
        assert_eq!(
            builder.explain(),
            strings(&[
                "One or more characters from ranges: Any character in ranges: 'a'-'z', 'A'-'Z', '0'-'9'"
            ])
        );

        assert_eq!(
            builder.char_ranges(&[], false, Quantity::none()),
            Err(BuilderError::EmptyRanges)
        );
        assert_eq!(
            builder.char_ranges(&[("a", "f"), ("9", "0")], true, Quantity::none()),
            Err(BuilderError::InvertedRange {
                start: '9',
                end: '0'
            })
        );
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_char_class_mixed() {
        let mut builder = PatternBuilder::new();
        builder
            .char_class_mixed("_-", &[("a", "f")], &[r"\d", r"\s"], true, Quantity::none())
            .unwrap();

        assert_eq!(builder.build(), r"[^_\-a-f\d\s]");
        assert_eq!(
            builder.explain(),
            strings(&[
                r"Any character NOT matching: characters '-_', ranges 'a'-'f', escape sequences \d, \s"
            ])
        );

        // a trailing hyphen stays literal when nothing follows it
        let mut builder = PatternBuilder::new();
        builder
            .char_class_mixed(".-", &[], &[], false, Quantity::exact(2))
            .unwrap();
        assert_eq!(builder.build(), "[.-]{2}");
        assert_eq!(
            builder.explain(),
            strings(&["Exactly 2 characters from class: Any character matching: characters '-.'"])
        );

        let re = builder.compile().unwrap();
        assert!(re.is_match("a-.").unwrap());
    }

    #[test]
    fn test_char_class_mixed_escape_sequences() {
        let mut builder = PatternBuilder::new();
        builder
            .char_class_mixed("", &[], &[r"\t", r"\w"], false, Quantity::none())
            .unwrap();
        assert_eq!(builder.build(), r"[\t\w]");

        assert!(matches!(
            builder.char_class_mixed("a", &[], &[r"\d", r"\b"], false, Quantity::none()),
            Err(BuilderError::InvalidEscapeSequence { sequence, .. }) if sequence == r"\b"
        ));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_special_and_exact_conflict() {
        let conflict = Quantity::exact(2).with_special('+');
        let mut builder = PatternBuilder::new();

        assert!(builder.digits(conflict).is_err());
        assert!(builder.word_chars(conflict).is_err());
        assert!(builder.literal("ab", conflict, false).is_err());
        assert!(builder.char_class("ab", false, conflict).is_err());
        assert!(builder.char_range("a", "b", false, conflict).is_err());
        assert!(builder.char_ranges(&[("a", "b")], false, conflict).is_err());
        assert!(builder
            .char_class_mixed("a", &[], &[], false, conflict)
            .is_err());

        builder.start_group(false);
        assert_eq!(
            builder.end_group(conflict),
            Err(BuilderError::ConflictingQuantifier)
        );

        // only the group start got in
        assert_eq!(builder.build(), "(?:");
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_quantity_errors_leave_builder_untouched() {
        let mut builder = PatternBuilder::new();
        builder.digits(Quantity::exact(2)).unwrap();

        assert_eq!(
            builder.digits(Quantity::exact(0)),
            Err(BuilderError::NonPositiveQuantity(0))
        );
        assert_eq!(
            builder.digits(Quantity::between(3, 2)),
            Err(BuilderError::MinNotLessThanMax { min: 3, max: 2 })
        );
        assert_eq!(
            builder.end_group(Quantity::special('!')),
            Err(BuilderError::InvalidSpecialQuantifier("!".to_owned()))
        );

        assert_eq!(builder.build(), r"\d{2}");
        assert_eq!(builder.explain(), strings(&["Exactly 2 digits"]));
    }

    #[test]
    fn test_chaining_end_to_end() -> Result<(), BuilderError> {
        let mut builder = PatternBuilder::new();
        builder
            .start_anchor(false)
            .literal("hello", Quantity::exact(2), false)?
            .digits(Quantity::between(2, 4))?
            .end_anchor(true);

        assert_eq!(builder.build(), r"\A(?:hello){2}\d{2,4}$");
        assert_eq!(
            builder.explain(),
            strings(&[
                "Start of text",
                "Exactly 2 literal strings: \"hello\"",
                "Between 2 and 4 digits",
                "End of line",
            ])
        );

        let re = builder.compile()?;
        assert!(re.is_match("hellohello123")?);
        assert!(!re.is_match("hello123")?);
        assert!(!re.is_match("xhellohello123")?);

        Ok(())
    }

    #[test]
    fn test_explain_length_matches_tokens() {
        let mut builder = PatternBuilder::new();
        builder
            .start_group(true)
            .literal("", Quantity::none(), false)
            .unwrap()
            .digits(Quantity::one_or_more())
            .unwrap()
            .end_group(Quantity::min(2))
            .unwrap();

        // four fragments for three tokens, the group quantifier is separate
        assert_eq!(builder.build(), r"(\d+){2,}");
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.explain().len(), 3);
    }

    #[test]
    fn test_flags() {
        let mut builder = PatternBuilder::new();
        builder
            .enable_multiline(true)
            .enable_ignorecase(true)
            .digits(Quantity::none())
            .unwrap();

        let re = builder.compile().unwrap();
        assert!(re.flags().contains(Flag::Multiline));
        assert!(re.flags().contains(Flag::IgnoreCase));
        assert!(!re.flags().contains(Flag::DotAll));

        // compiling leaves the builder unchanged
        assert_eq!(builder.build(), r"\d");
        assert_eq!(re.as_str(), r"\d");
    }

    #[test]
    fn test_flags_idempotent() {
        let mut once = PatternBuilder::new();
        once.enable_multiline(true);

        let mut twice = PatternBuilder::new();
        twice.enable_multiline(true).enable_multiline(true);
        assert_eq!(once.flags(), twice.flags());

        let mut never = PatternBuilder::new();
        never.enable_multiline(false);
        assert!(never.flags().is_empty());

        // toggling back off
        once.enable_multiline(false);
        assert_eq!(once.flags(), never.flags());
    }

    #[test]
    fn test_flags_affect_matching() {
        let mut builder = PatternBuilder::new();
        builder
            .start_anchor(true)
            .literal("abc", Quantity::none(), false)
            .unwrap()
            .end_anchor(true);

        let text = "x\nABC\ny";
        assert!(!builder.compile().unwrap().is_match(text).unwrap());

        builder.enable_multiline(true).enable_ignorecase(true);
        assert!(builder.compile().unwrap().is_match(text).unwrap());

        builder.enable_dotall(true);
        assert_eq!(builder.flags().inline_prefix(), "(?ims)");
        assert!(builder.compile().unwrap().is_match(text).unwrap());
    }

    #[test]
    fn test_compiled_lookbehind() {
        let mut prefix = PatternBuilder::new();
        prefix.literal("$", Quantity::none(), false).unwrap();

        let mut builder = PatternBuilder::new();
        builder
            .lookbehind(&prefix)
            .digits(Quantity::one_or_more())
            .unwrap();

        assert_eq!(builder.build(), r"(?<=\$)\d+");

        let re = builder.compile().unwrap();
        let found = re.find("pay 10 or $25").unwrap().unwrap();
        assert_eq!(found.as_str(), "25");
    }
}
