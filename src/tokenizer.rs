/// The token module defines the token vocabulary of the language.
///
/// Declares the `Token` enum covering identifiers, literals, keywords and
/// one-character operators, the `TokenData` wrapper that attaches a source
/// position, and the fixed keyword/operator lookup table.
///
/// # Responsibilities
/// - Defines every token the tokenizer can emit.
/// - Maps keyword and operator spellings to their token types.
pub mod token;

/// The core module implements the tokenizer state machine.
///
/// Reads the source text one decoded character at a time, classifies each
/// character, and accumulates or emits tokens. A single-character pushback
/// buffer provides the one-character lookahead needed to close identifiers
/// and numbers on the first character that does not belong to them.
///
/// # Responsibilities
/// - Drives the `None`/`Identifier`/`Number`/`String`/`Escape` states.
/// - Tracks line and column for error reporting.
/// - Reclassifies finished identifiers through the keyword table.
pub mod core;
