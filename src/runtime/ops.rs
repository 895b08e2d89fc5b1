/// Built-in operation tables.
///
/// Registers the boolean operator table, the none-sentinel equality table,
/// the numeric tower operations with their promotion/demotion glue, and the
/// unary operators, exactly one registration per valid
/// `(operator, kind, kind)` triple.
pub mod builtin;
/// The operator registry.
///
/// Declares the `Operator` enum, the `Operation` function type, and the
/// registry that resolves exact kind pairs to operations with a one-entry
/// resolution memo.
pub mod core;
