//! # mathlang
//!
//! mathlang is the runtime core of a small numeric expression language.
//! It provides the dynamically-typed value model (booleans, integers, reals,
//! complex numbers, vectors and a "no value" sentinel), the operator dispatch
//! engine that resolves arithmetic, comparison and unary operations across
//! that type tower, and the tokenizer that turns source text into a token
//! stream for an external parser.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::LexError,
    tokenizer::{core::Tokenizer, token::TokenData},
};

/// Provides unified error types for tokenization and evaluation.
///
/// This module defines all errors that can be raised while lexing source text
/// or while operating on runtime values. It standardizes error reporting and
/// carries detailed information about failures, including source positions for
/// lexical errors and operator/type names for runtime errors.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (tokenizer, operator engine,
///   member and index access).
/// - Attaches line/column numbers or type names for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Hosts the runtime value model and the operator dispatch engine.
///
/// This module ties together the value hierarchy, the numeric tower with its
/// promotion and demotion rules, the operator registry, the array pool backing
/// vector storage, and the thin variable-storage types used by an external
/// evaluator. It exposes the [`runtime::core::Runtime`] context object as the
/// public API for operator invocation and member/index access.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value kinds.
/// - Resolves `(operator, kind, kind)` triples to concrete operations.
/// - Manages canonical value caches and pooled vector storage.
pub mod runtime;
/// Converts raw source text into a stream of typed tokens.
///
/// The tokenizer reads the input character by character and produces tokens
/// for identifiers, numbers, strings, keywords and one-character operators,
/// each carrying its source position. It is the first stage of interpretation
/// and is consumed by an external parser.
///
/// # Responsibilities
/// - Classifies characters with Unicode-aware predicates and a small state
///   machine with one character of pushback.
/// - Handles string escapes and keyword reclassification.
/// - Reports lexical errors with line and column information.
pub mod tokenizer;
/// General numeric utilities shared across the runtime.
///
/// This module provides small helpers used by the value model and the
/// operator engine, such as integrality checks on floating-point values and
/// safe extraction of vector indices from signed integers.
///
/// # Responsibilities
/// - Decide whether an `f64` exactly represents an integer.
/// - Convert `i64` index candidates to `usize` without silent wraparound.
pub mod util;

/// Tokenizes an entire source string into a flat token sequence.
///
/// This is a convenience wrapper around [`Tokenizer`] that pulls tokens until
/// end of input. The terminating [`tokenizer::token::Token::Eof`] is not
/// included in the returned sequence.
///
/// # Errors
/// Returns a [`LexError`] if the source contains an unexpected character, an
/// invalid escape sequence or a malformed numeric literal.
///
/// # Examples
/// ```
/// use mathlang::{tokenize, tokenizer::token::Token};
///
/// let tokens = tokenize("let x = 3 + 4;").unwrap();
/// assert_eq!(tokens[0].token, Token::Let);
/// assert_eq!(tokens[1].token, Token::Identifier("x".into()));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<TokenData>, LexError> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();

    loop {
        let data = tokenizer.next_token()?;
        if data.token == tokenizer::token::Token::Eof {
            break;
        }
        tokens.push(data);
    }

    Ok(tokens)
}
