/// Lexical errors.
///
/// Defines all error types that can occur while tokenizing source text.
/// Lexical errors include unexpected characters, invalid escape sequences and
/// malformed numeric literals, and always carry a source position.
pub mod lex_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while operating on runtime
/// values. Runtime errors include unresolvable operator/kind combinations,
/// unsupported member or index access, division by zero, and vector
/// configuration failures.
pub mod runtime_error;

pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
