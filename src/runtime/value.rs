/// Complex number support.
///
/// Defines the `ComplexNumber` pair-of-doubles type with its arithmetic
/// operators, and the `Complex` runtime handle with a lazily cached magnitude
/// that is invalidated on mutation.
pub mod complex;
/// The closed set of runtime value kinds.
///
/// Declares the `Value` enum, the `Kind` tag used as a dispatch key, and the
/// shared member/index access contracts. Access a kind does not explicitly
/// support fails rather than silently succeeding.
pub mod core;
/// The numeric tower below `Value`.
///
/// Defines the `Discrete` and `Real` handles with their constant/mutable
/// contract, the canonical value cache and the pure per-kind operation
/// tables used by the operator engine and by cross-kind promotion.
pub mod number;
/// Pooled, fixed-length, homogeneous vectors.
///
/// Defines the `Vector` handle backed by pooled storage, its factory type
/// and the index/named-component access rules, including growth on
/// out-of-range named writes.
pub mod vector;
