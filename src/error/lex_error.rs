#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during tokenization.
pub enum LexError {
    /// Encountered a character the tokenizer cannot classify.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        col:       usize,
    },
    /// A string escape sequence used an unsupported escape letter.
    InvalidEscape {
        /// The offending escape letter.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        col:       usize,
    },
    /// A numeric literal could not be parsed as a floating-point value.
    InvalidNumber {
        /// The accumulated literal text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
        /// The source column where the error occurred.
        col:  usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line, col } => {
                write!(f, "Error on line {line}, column {col}: Unexpected character: {character}.")
            },
            Self::InvalidEscape { character, line, col } => {
                write!(f, "Error on line {line}, column {col}: Invalid escape character: {character}.")
            },
            Self::InvalidNumber { text, line, col } => {
                write!(f, "Error on line {line}, column {col}: Invalid numeric literal: {text}.")
            },
        }
    }
}

impl std::error::Error for LexError {}
