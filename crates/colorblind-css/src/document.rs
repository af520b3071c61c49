//! Editable stylesheet document.
//!
//! # Design
//!
//! The filter only ever changes declaration values, so the document does not
//! build a full syntax tree. Parsing records, for every declaration, its
//! property name, its value text and the byte range of that value in the
//! source. Writing the document back copies the source verbatim and splices
//! in the current value of each declaration. Selectors, comments, at-rule
//! preludes and indentation survive byte-for-byte.
//!
//! The parser is built on top of `cssparser` (the same tokenizer used by
//! Firefox), so comments, escapes and nested blocks are handled robustly.
//! Parsing never fails: malformed rules and declarations are skipped, recorded
//! as [`Skipped`] and left untouched in the output.
//!
//! ## Block contents
//!
//! - Style rules (`.a, #b > c { ... }`) contain declarations.
//! - Conditional and grouping at-rules (`@media`, `@supports`, `@layer`,
//!   `@container`, `@keyframes`, ...) contain rules.
//! - Every other block at-rule (`@font-face`, `@page`, ...) contains
//!   declarations.
//! - Inside a style rule, blocks follow CSS nesting: a rule body may hold
//!   nested rules (`&:hover { ... }`) and nested at-rules, whose own blocks
//!   hold declarations again.
//!
//! # Example
//!
//! ```rust
//! use colorblind_css::Stylesheet;
//!
//! let mut sheet = Stylesheet::parse(".a {\n  color: red;\n  margin: 0 auto;\n}\n");
//! assert_eq!(sheet.declarations().len(), 2);
//! assert_eq!(sheet.declarations()[0].property(), "color");
//! assert_eq!(sheet.declarations()[0].location().line, 2);
//!
//! sheet.declarations_mut()[0].set_value("blue");
//! assert_eq!(sheet.to_css(), ".a {\n  color: blue;\n  margin: 0 auto;\n}\n");
//! ```

use std::fmt;
use std::ops::Range;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, SourceLocation, Token,
};

/// At-rules whose block contains rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "-moz-document",
    "layer",
    "container",
    "scope",
    "starting-style",
    "keyframes",
    "-webkit-keyframes",
    "-moz-keyframes",
    "-o-keyframes",
];

/// A position in the source text.
///
/// Lines start at 1; columns start at 1 and count UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<SourceLocation> for Location {
    fn from(loc: SourceLocation) -> Self {
        Location {
            line: loc.line,
            column: loc.column,
        }
    }
}

/// One `property: value` pair found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    property: String,
    value: String,
    location: Location,
    span: Range<usize>,
}

impl Declaration {
    /// The property name as written.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The current value text, without surrounding whitespace.
    ///
    /// Includes a trailing `!important` when present.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the value starts in the source.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Byte range of the original value in the source.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Replaces the value. Written back by [`Stylesheet::to_css`].
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// A malformed construct the parser stepped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub location: Location,
    /// The source text that was skipped.
    pub text: String,
}

/// A parsed stylesheet whose declaration values can be edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    source: String,
    declarations: Vec<Declaration>,
    skipped: Vec<Skipped>,
}

impl Stylesheet {
    /// Parses a stylesheet, recovering from errors.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new_with_line_number_offset(css, 1);
        let mut parser = Parser::new(&mut input);

        let mut collector = RuleCollector::default();
        collector.collect_rules(&mut parser);

        let RuleCollector {
            mut declarations,
            skipped,
            ..
        } = collector;
        declarations.sort_by_key(|d| d.span.start);

        for item in &skipped {
            tracing::warn!(
                location = %item.location,
                text = %item.text,
                "skipped malformed CSS"
            );
        }

        Stylesheet {
            source: css.to_string(),
            declarations,
            skipped,
        }
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All declarations, in document order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Mutable access to the declarations, in document order.
    pub fn declarations_mut(&mut self) -> &mut [Declaration] {
        &mut self.declarations
    }

    /// Constructs the parser could not make sense of.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// The value a declaration had in the source.
    pub fn original_value(&self, declaration: &Declaration) -> &str {
        &self.source[declaration.span()]
    }

    /// Serializes the document with the current declaration values.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = 0;
        for decl in &self.declarations {
            f.write_str(&self.source[cursor..decl.span.start])?;
            f.write_str(&decl.value)?;
            cursor = decl.span.end;
        }
        f.write_str(&self.source[cursor..])
    }
}

// ─── cssparser glue ─────────────────────────────────────────────────────────

#[derive(Default)]
struct RuleCollector {
    declarations: Vec<Declaration>,
    skipped: Vec<Skipped>,
    /// Number of enclosing style rules. Non-zero means CSS nesting applies.
    style_depth: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Rules,
    Declarations,
}

impl RuleCollector {
    fn collect_rules(&mut self, input: &mut Parser<'_, '_>) {
        let failures: Vec<Skipped> = cssparser::StyleSheetParser::new(input, self)
            .filter_map(Result::err)
            .map(|(error, text)| skipped(error, text))
            .collect();
        self.skipped.extend(failures);
    }

    /// Collects a block holding declarations and, under nesting, style rules.
    fn collect_declarations(&mut self, input: &mut Parser<'_, '_>) {
        let failures: Vec<Skipped> = RuleBodyParser::new(input, self)
            .filter_map(Result::err)
            .map(|(error, text)| skipped(error, text))
            .collect();
        self.skipped.extend(failures);
    }
}

fn skipped(error: ParseError<'_, ()>, text: &str) -> Skipped {
    Skipped {
        location: error.location.into(),
        text: text.trim().to_string(),
    }
}

/// Consumes the rest of the current block or prelude.
fn consume_all(input: &mut Parser<'_, '_>) {
    while input.next_including_whitespace_and_comments().is_ok() {}
}

impl<'i> QualifiedRuleParser<'i> for RuleCollector {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // Selectors are never rewritten, so any prelude is accepted as-is.
        consume_all(input);
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        self.style_depth += 1;
        self.collect_declarations(input);
        self.style_depth -= 1;
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for RuleCollector {
    type Prelude = BlockKind;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        consume_all(input);
        let grouping = GROUPING_AT_RULES
            .iter()
            .any(|rule| name.eq_ignore_ascii_case(rule));
        Ok(if grouping && self.style_depth == 0 {
            BlockKind::Rules
        } else {
            BlockKind::Declarations
        })
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        // `@import`, `@namespace`, `@layer a, b;` and friends carry no declarations.
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        kind: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        match kind {
            BlockKind::Rules => self.collect_rules(input),
            BlockKind::Declarations => self.collect_declarations(input),
        }
        Ok(())
    }
}

impl<'i> DeclarationParser<'i> for RuleCollector {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        input.skip_whitespace();
        let start = input.position();
        let location = input.current_source_location();

        // `a:hover { ... }` inside a rule body is a nested rule, not a declaration.
        let mut nested_block = false;
        while let Ok(token) = input.next_including_whitespace_and_comments() {
            if matches!(token, Token::CurlyBracketBlock) {
                nested_block = true;
                break;
            }
        }
        if nested_block {
            return Err(input.new_custom_error(()));
        }

        let value = input.slice_from(start).trim_end();
        let begin = start.byte_index();
        self.declarations.push(Declaration {
            property: name.as_ref().to_string(),
            value: value.to_string(),
            location: location.into(),
            span: begin..begin + value.len(),
        });
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for RuleCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
    .some-color {
      border: 3px #D929E2 dashed;
      color: #B28200;
      font-size: 12px;
    }
    #other-thing {
      border-color: lime
    }
    ";

    fn values(sheet: &Stylesheet) -> Vec<(&str, &str)> {
        sheet
            .declarations()
            .iter()
            .map(|d| (d.property(), d.value()))
            .collect()
    }

    #[test]
    fn test_parse_simple() {
        let sheet = Stylesheet::parse(SAMPLE);
        assert_eq!(
            values(&sheet),
            vec![
                ("border", "3px #D929E2 dashed"),
                ("color", "#B28200"),
                ("font-size", "12px"),
                ("border-color", "lime"),
            ]
        );
        assert!(sheet.skipped().is_empty());
    }

    #[test]
    fn test_untouched_round_trip_is_identical() {
        let sheet = Stylesheet::parse(SAMPLE);
        assert_eq!(sheet.to_css(), SAMPLE);
    }

    #[test]
    fn test_locations_are_one_based() {
        let sheet = Stylesheet::parse(SAMPLE);
        let border = &sheet.declarations()[0];
        assert_eq!(border.location(), Location { line: 3, column: 15 });
        let last = &sheet.declarations()[3];
        assert_eq!(last.location(), Location { line: 8, column: 21 });
    }

    #[test]
    fn test_span_points_at_value() {
        let sheet = Stylesheet::parse(SAMPLE);
        for decl in sheet.declarations() {
            assert_eq!(sheet.original_value(decl), decl.value());
        }
    }

    #[test]
    fn test_set_value_splices_in_place() {
        let mut sheet = Stylesheet::parse("a { color: red; background: blue }");
        sheet.declarations_mut()[1].set_value("#000000");
        assert_eq!(sheet.to_css(), "a { color: red; background: #000000 }");
    }

    #[test]
    fn test_trailing_whitespace_and_important() {
        let sheet = Stylesheet::parse("a { color :  red  !important ; }");
        let decl = &sheet.declarations()[0];
        assert_eq!(decl.property(), "color");
        assert_eq!(decl.value(), "red  !important");
    }

    #[test]
    fn test_comments_are_preserved() {
        let css = "/* head */\na { /* x */ color: /* y */ red; }\n";
        let mut sheet = Stylesheet::parse(css);
        assert_eq!(sheet.declarations()[0].value(), "red");
        sheet.declarations_mut()[0].set_value("blue");
        assert_eq!(sheet.to_css(), "/* head */\na { /* x */ color: /* y */ blue; }\n");
    }

    #[test]
    fn test_function_values_are_kept_whole() {
        let sheet =
            Stylesheet::parse("a { background: url(x.png) no-repeat; color: rgb(1, 2, 3) }");
        assert_eq!(
            values(&sheet),
            vec![
                ("background", "url(x.png) no-repeat"),
                ("color", "rgb(1, 2, 3)"),
            ]
        );
    }

    #[test]
    fn test_media_rules_are_descended() {
        let css = "@media (max-width: 600px) { .a { color: red } @supports (display: grid) { .b { color: blue } } }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(values(&sheet), vec![("color", "red"), ("color", "blue")]);
    }

    #[test]
    fn test_declaration_at_rules() {
        let css = "@font-face { font-family: Foo; src: url(foo.woff) } @page { margin: 1in }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            values(&sheet),
            vec![
                ("font-family", "Foo"),
                ("src", "url(foo.woff)"),
                ("margin", "1in"),
            ]
        );
    }

    #[test]
    fn test_keyframes() {
        let css = "@keyframes pulse { from { color: red } 50% { color: lime } to { color: blue } }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(sheet.declarations().len(), 3);
    }

    #[test]
    fn test_statement_at_rules_are_ignored() {
        let css = "@charset \"utf-8\";\n@import url(a.css);\na { color: red }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(values(&sheet), vec![("color", "red")]);
        assert!(sheet.skipped().is_empty());
        assert_eq!(sheet.to_css(), css);
    }

    #[test]
    fn test_malformed_declaration_is_skipped() {
        let css = "a { color red; border: 1px solid red; }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(values(&sheet), vec![("border", "1px solid red")]);
        assert_eq!(sheet.skipped().len(), 1);
        assert_eq!(sheet.skipped()[0].text, "color red;");
        assert_eq!(sheet.to_css(), css);
    }

    #[test]
    fn test_empty_input() {
        let sheet = Stylesheet::parse("");
        assert!(sheet.declarations().is_empty());
        assert_eq!(sheet.to_css(), "");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location { line: 4, column: 2 }.to_string(), "4:2");
    }

    #[test]
    fn test_nested_rules_keep_following_declarations() {
        let css = ".a { color: red; &:hover { color: blue } background: lime }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            values(&sheet),
            vec![("color", "red"), ("color", "blue"), ("background", "lime")]
        );
        assert!(sheet.skipped().is_empty());
    }

    #[test]
    fn test_nested_rule_starting_with_ident() {
        let css = ".a { color: red; a:hover { color: blue } margin: 0 }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            values(&sheet),
            vec![("color", "red"), ("color", "blue"), ("margin", "0")]
        );
    }

    #[test]
    fn test_nested_media_holds_declarations() {
        let css = ".a { @media (min-width: 1px) { color: red } }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(values(&sheet), vec![("color", "red")]);
    }

    #[test]
    fn test_value_keeps_trailing_comment() {
        let sheet = Stylesheet::parse("a { color: red /* blue */ }");
        assert_eq!(values(&sheet), vec![("color", "red /* blue */")]);
    }
}
