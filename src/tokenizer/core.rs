use std::{collections::HashMap, str::Chars};

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::{
    error::LexError,
    tokenizer::token::{Token, TokenData, keyword_table},
};

/// The state the tokenizer is in while accumulating a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    None,
    Identifier,
    Number,
    Str,
    Escape,
}

/// The family a finished token belongs to, decided when its first character
/// is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Identifier,
    Number,
    Str,
}

/// A streaming tokenizer over source text.
///
/// Produces one token per [`Tokenizer::next_token`] call, pull-based, with no
/// state between calls beyond the cursor itself. One character of lookahead
/// is kept in a pushback buffer: when a character turns out to belong to the
/// *next* token, it is replayed on the following read instead of rewinding
/// the input.
///
/// NUL characters in the input are skipped; they serve as an end-of-stream
/// sentinel internally, so a literal NUL byte is not representable.
pub struct Tokenizer<'a> {
    chars:    Chars<'a>,
    pending:  Option<char>,
    keywords: HashMap<&'static str, Token>,
    buf:      String,
    line:     usize,
    col:      usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given source text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { chars:    source.chars(),
               pending:  None,
               keywords: keyword_table(),
               buf:      String::new(),
               line:     1,
               col:      0, }
    }

    /// The line the tokenizer is currently on (1-based).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The column of the last consumed character (1-based).
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Reads the next character, honoring the pushback buffer and skipping
    /// NUL bytes so they can act as an end-of-stream marker.
    fn get_char(&mut self) -> Option<char> {
        if let Some(c) = self.pending.take() {
            return Some(c);
        }
        self.chars.by_ref().find(|&c| c != '\0')
    }

    /// Replays a character on the next read. The column counter is wound
    /// back one step so the character is counted once when reconsumed.
    fn push_back(&mut self, c: char) {
        self.pending = Some(c);
        self.col -= 1;
    }

    /// Resolves a string escape letter to its control character.
    const fn escape_char(c: char) -> Option<char> {
        match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            'f' => Some('\x0C'),
            't' => Some('\t'),
            '\\' => Some('\\'),
            _ => None,
        }
    }

    /// Produces the next token from the input.
    ///
    /// Returns [`Token::Eof`] once the input is exhausted; calling again
    /// after that keeps returning `Eof`.
    ///
    /// # Errors
    /// Returns a [`LexError`] for unexpected characters, invalid escape
    /// sequences and malformed numeric literals, each carrying the source
    /// position.
    ///
    /// # Examples
    /// ```
    /// use mathlang::tokenizer::{core::Tokenizer, token::Token};
    ///
    /// let mut tokenizer = Tokenizer::new("x1");
    /// let data = tokenizer.next_token().unwrap();
    /// assert_eq!(data.token, Token::Identifier("x1".into()));
    /// assert_eq!(tokenizer.next_token().unwrap().token, Token::Eof);
    /// ```
    pub fn next_token(&mut self) -> Result<TokenData, LexError> {
        self.buf.clear();
        let mut mode = Mode::None;
        let mut family = None;

        while let Some(c) = self.get_char() {
            self.col += 1;

            // String bodies and escapes do not care what category the
            // character is, so they are handled before classification.
            match mode {
                Mode::Str => {
                    if c == '\\' {
                        mode = Mode::Escape;
                    } else if c == '"' {
                        break;
                    } else {
                        self.buf.push(c);
                    }
                    continue;
                },
                Mode::Escape => {
                    let Some(resolved) = Self::escape_char(c) else {
                        return Err(LexError::InvalidEscape { character: c,
                                                             line:      self.line,
                                                             col:       self.col, });
                    };
                    self.buf.push(resolved);
                    mode = Mode::Str;
                    continue;
                },
                _ => {},
            }

            // The category matters for the rest.
            if c.is_whitespace() || c.is_control() {
                if mode != Mode::None {
                    // Terminate the token before counting the whitespace, so
                    // positions refer to where the token actually ends.
                    self.push_back(c);
                    break;
                }
                if c == '\n' {
                    self.line += 1;
                    self.col = 0;
                }
                continue;
            } else if c.is_alphabetic()
                || matches!(get_general_category(c),
                            GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark)
            {
                // Letters of any script; combining marks belong to the
                // identifier they follow.
                match mode {
                    Mode::None => {
                        mode = Mode::Identifier;
                        family = Some(Family::Identifier);
                        self.buf.push(c);
                    },
                    Mode::Identifier => self.buf.push(c),
                    _ => {
                        self.push_back(c);
                        break;
                    },
                }
            } else if c.is_ascii_digit() {
                match mode {
                    Mode::None => {
                        mode = Mode::Number;
                        family = Some(Family::Number);
                        self.buf.push(c);
                    },
                    Mode::Number | Mode::Identifier => self.buf.push(c),
                    _ => {
                        self.push_back(c);
                        break;
                    },
                }
            } else if matches!(get_general_category(c),
                               GeneralCategory::Format
                               | GeneralCategory::PrivateUse
                               | GeneralCategory::Surrogate
                               | GeneralCategory::Unassigned)
            {
                return Err(LexError::UnexpectedCharacter { character: c,
                                                           line:      self.line,
                                                           col:       self.col, });
            } else {
                // Punctuation and symbols of any script.
                if c == '"' {
                    if mode == Mode::None {
                        mode = Mode::Str;
                        family = Some(Family::Str);
                        continue;
                    }
                    self.push_back(c);
                    break;
                }
                match mode {
                    Mode::None => {
                        if c == '_' {
                            // Underscores are identifier characters.
                            mode = Mode::Identifier;
                            family = Some(Family::Identifier);
                            self.buf.push(c);
                        } else {
                            // Everything else is a one-character token.
                            return Ok(self.symbol_token(c));
                        }
                    },
                    Mode::Number => {
                        if c == '.' {
                            self.buf.push(c);
                        } else {
                            self.push_back(c);
                            break;
                        }
                    },
                    Mode::Identifier => {
                        if c == '_' {
                            self.buf.push(c);
                        } else {
                            self.push_back(c);
                            break;
                        }
                    },
                    Mode::Str | Mode::Escape => unreachable!(),
                }
            }
        }

        let token = match family {
            None => Token::Eof,
            Some(Family::Identifier) => {
                // An identifier-shaped token could be a keyword.
                self.keywords
                    .get(self.buf.as_str())
                    .cloned()
                    .unwrap_or_else(|| Token::Identifier(self.buf.clone()))
            },
            Some(Family::Number) => match self.buf.parse::<f64>() {
                Ok(literal) => Token::Number(literal),
                Err(_) => {
                    return Err(LexError::InvalidNumber { text: self.buf.clone(),
                                                         line: self.line,
                                                         col:  self.col, });
                },
            },
            Some(Family::Str) => Token::Str(self.buf.clone()),
        };

        Ok(TokenData { token,
                       line: self.line,
                       col: self.col })
    }

    /// Emits a one-character operator token, falling back to a generic
    /// [`Token::Symbol`] for punctuation without a dedicated type.
    fn symbol_token(&self, c: char) -> TokenData {
        let mut tmp = [0_u8; 4];
        let token = self.keywords
                        .get(c.encode_utf8(&mut tmp) as &str)
                        .cloned()
                        .unwrap_or(Token::Symbol(c));
        TokenData { token,
                    line: self.line,
                    col: self.col }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<TokenData, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(TokenData { token: Token::Eof, .. }) => None,
            other => Some(other),
        }
    }
}
