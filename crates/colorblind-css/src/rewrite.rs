//! Declaration value rewriting.

use colorblind_sim::SimulationFn;

use crate::transform::transform_token;

/// Rewrites every color token of a declaration value.
///
/// The value is split on whitespace, each token is transformed independently
/// and the results are joined with single spaces. Token count and order are
/// preserved; runs of whitespace collapse to one space.
///
/// Comments (`/* ... */`) are copied verbatim and never rewritten. A
/// trailing `!important` glued to a token is split off before the token is
/// classified, so `red!important` is still recognized as `red`.
///
/// ```rust
/// use colorblind_css::rewrite_value;
/// use colorblind_sim::Deficiency;
///
/// let simulate = Deficiency::Achromatopsia.simulation();
/// assert_eq!(rewrite_value("3px #D929E2 solid", simulate), "3px #5c5c5c solid");
/// assert_eq!(rewrite_value("red /* red */", simulate), "#363636 /* red */");
/// ```
pub fn rewrite_value(value: &str, simulate: SimulationFn) -> String {
    let mut out = String::with_capacity(value.len());
    let mut space = false;
    for piece in (Pieces { rest: value }) {
        match piece {
            Piece::Space => {
                space = !out.is_empty();
                continue;
            }
            Piece::Comment(text) => {
                if space {
                    out.push(' ');
                }
                out.push_str(text);
            }
            Piece::Word(word) => {
                if space {
                    out.push(' ');
                }
                let (token, important) = split_important(word);
                out.push_str(&transform_token(token, simulate));
                out.push_str(important);
            }
        }
        space = false;
    }
    out
}

/// Splits `red!important` into `("red", "!important")`.
fn split_important(word: &str) -> (&str, &str) {
    match word.find('!') {
        Some(i) if i > 0 && word[i + 1..].eq_ignore_ascii_case("important") => word.split_at(i),
        _ => (word, ""),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Piece<'a> {
    Space,
    Comment(&'a str),
    Word(&'a str),
}

/// Splits a value into whitespace runs, comments and words.
///
/// An unterminated comment runs to the end of the value.
struct Pieces<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        let first = self.rest.chars().next()?;
        let (piece, len) = if first.is_whitespace() {
            let len = self
                .rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(self.rest.len());
            (Piece::Space, len)
        } else if self.rest.starts_with("/*") {
            let len = self.rest[2..]
                .find("*/")
                .map_or(self.rest.len(), |end| end + 4);
            (Piece::Comment(&self.rest[..len]), len)
        } else {
            let len = self
                .rest
                .char_indices()
                .find(|&(i, c)| c.is_whitespace() || self.rest[i..].starts_with("/*"))
                .map_or(self.rest.len(), |(i, _)| i);
            (Piece::Word(&self.rest[..len]), len)
        };
        self.rest = &self.rest[len..];
        Some(piece)
    }
}
