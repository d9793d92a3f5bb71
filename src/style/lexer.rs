//! logos-based lexer for CSS value strings.
//!
//! Container styles arrive as free-form value strings ("url(bg.png) no-repeat
//! #202020", "translate(4px, 8px) rotate(45deg)"). This lexer splits them into
//! the token shapes the value parsers consume.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor beats `#` failing to lex)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `url(a.png)` matches [`ValueToken::Url`] as one token
//! - `45deg` matches [`ValueToken::Dimension`], not `Number` + `Ident`
//! - `rgb(` matches [`ValueToken::FunctionOpen`], not `Ident` + junk

use logos::Logos;

/// A token inside a CSS value string.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum ValueToken {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `url(...)` reference, captured whole so inner spaces survive.
    #[regex(r"url\([^)]*\)")]
    Url,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number with a unit suffix: `16px`, `1fr`, `45deg`, `50%`, `2em`.
    #[regex(r"[+-]?[0-9]*\.?[0-9]+(px|em|rem|fr|vw|vh|deg|rad|grad|turn|%)")]
    Dimension,

    /// Bare number, integer or float, possibly signed.
    #[regex(r"[+-]?[0-9]*\.?[0-9]+")]
    Number,

    /// Function head: an identifier immediately followed by `(`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*\(")]
    FunctionOpen,

    /// Identifier: keywords, color names, anchor names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    // ── Single-character punctuation ─────────────────────────────────

    /// `,`
    #[token(",")]
    Comma,

    /// `/`
    #[token("/")]
    Slash,

    /// `)`
    #[token(")")]
    ParenClose,
}

/// Tokenize a value string into `(token, slice)` pairs.
///
/// Slices that fail to lex are skipped rather than reported; an unparseable
/// fragment of a style value must never make the whole property fatal.
pub fn tokenize_value(input: &str) -> Vec<(ValueToken, String)> {
    ValueToken::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<ValueToken> {
        tokenize_value(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn url_is_one_token() {
        let toks = tokenize_value("url(images/bg 2.png) no-repeat");
        assert_eq!(toks[0], (ValueToken::Url, "url(images/bg 2.png)".to_owned()));
        assert_eq!(toks[1].0, ValueToken::Ident);
    }

    #[test]
    fn dimension_beats_number_plus_ident() {
        assert_eq!(kinds("45deg"), vec![ValueToken::Dimension]);
        assert_eq!(kinds("1.5fr"), vec![ValueToken::Dimension]);
        assert_eq!(kinds("-4px"), vec![ValueToken::Dimension]);
        assert_eq!(kinds("50%"), vec![ValueToken::Dimension]);
    }

    #[test]
    fn function_head() {
        assert_eq!(
            kinds("rgb(255, 0, 0)"),
            vec![
                ValueToken::FunctionOpen,
                ValueToken::Number,
                ValueToken::Comma,
                ValueToken::Number,
                ValueToken::Comma,
                ValueToken::Number,
                ValueToken::ParenClose,
            ]
        );
    }

    #[test]
    fn hex_colors() {
        assert_eq!(kinds("#fff #ff00aa80"), vec![ValueToken::HexColor, ValueToken::HexColor]);
    }

    #[test]
    fn bad_fragments_are_skipped() {
        // `@` has no token shape; the rest still lexes.
        let toks = kinds("red @ blue");
        assert_eq!(toks, vec![ValueToken::Ident, ValueToken::Ident]);
    }

    #[test]
    fn slash_separates_position_and_size() {
        assert_eq!(
            kinds("center / 100%"),
            vec![ValueToken::Ident, ValueToken::Slash, ValueToken::Dimension]
        );
    }
}
