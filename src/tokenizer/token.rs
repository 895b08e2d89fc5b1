use std::collections::HashMap;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the
/// tokenizer. This enum defines all recognized tokens in the language:
/// literals, identifiers, keywords and one-character operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier tokens; variable or function names such as `x` or `площа`.
    Identifier(String),
    /// Numeric literal tokens such as `42` or `3.14`, parsed as `f64`.
    Number(f64),
    /// String literal tokens with escapes already resolved.
    Str(String),

    /// `let`
    Let,
    /// `mut`
    Mut,
    /// `const`
    Const,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `switch`
    Switch,
    /// `break`
    Break,
    /// `return`
    Return,
    /// `in`
    In,

    /// `|`
    Union,
    /// `&`
    Intersect,
    /// `!`
    Not,
    /// `=`
    Equals,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `^`
    Power,
    /// `'`
    Diff,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,

    /// Any punctuation or symbol character without a dedicated token type.
    Symbol(char),
    /// End of the input stream.
    Eof,
}

/// A token together with the source position where it was completed.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenData {
    /// The token itself.
    pub token: Token,
    /// The source line the token ends on (1-based).
    pub line:  usize,
    /// The source column the token ends on (1-based).
    pub col:   usize,
}

/// Builds the fixed lookup table for keywords and one-character operators.
///
/// Identifier-shaped tokens are reclassified through this table after they
/// are fully accumulated; single punctuation characters are looked up here
/// before falling back to [`Token::Symbol`].
#[must_use]
pub fn keyword_table() -> HashMap<&'static str, Token> {
    HashMap::from([("let", Token::Let),
                   ("mut", Token::Mut),
                   ("const", Token::Const),
                   ("if", Token::If),
                   ("else", Token::Else),
                   ("for", Token::For),
                   ("while", Token::While),
                   ("switch", Token::Switch),
                   ("break", Token::Break),
                   ("return", Token::Return),
                   ("in", Token::In),
                   ("|", Token::Union),
                   ("&", Token::Intersect),
                   ("!", Token::Not),
                   ("=", Token::Equals),
                   (">", Token::Greater),
                   ("<", Token::Less),
                   ("+", Token::Plus),
                   ("-", Token::Minus),
                   ("*", Token::Multiply),
                   ("/", Token::Divide),
                   ("%", Token::Modulo),
                   ("^", Token::Power),
                   ("'", Token::Diff),
                   ("(", Token::OpenParen),
                   (")", Token::CloseParen),
                   ("{", Token::OpenBrace),
                   ("}", Token::CloseBrace),
                   ("[", Token::OpenBracket),
                   ("]", Token::CloseBracket),
                   (",", Token::Comma),
                   (".", Token::Dot),
                   (":", Token::Colon),
                   (";", Token::Semicolon)])
}
