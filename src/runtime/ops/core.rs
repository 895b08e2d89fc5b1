use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use crate::{
    error::RuntimeError,
    runtime::{
        pool::ArrayPool,
        value::{
            core::{Kind, Value},
            number::ValueCache,
        },
    },
};

/// Result type used by the operator engine and the value model.
pub type OpResult<T> = Result<T, RuntimeError>;

/// The operators the engine can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+` (logical OR on booleans).
    Add,
    /// `-`
    Subtract,
    /// `*` (logical AND on booleans).
    Multiply,
    /// `/`
    Divide,
    /// `^` (logical XOR on booleans).
    Power,
    /// `|`
    Union,
    /// `&`
    Intersect,
    /// `in`
    In,
    /// `==`
    Equal,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `!in`
    NotIn,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// Unary `!`.
    Not,
    /// Unary `-`.
    Negate,
    /// Unary `|x|`.
    Magnitude,
    /// Substitution; identity on leaf values.
    Substitute,
    /// Evaluation; identity on leaf values.
    Evaluate,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Power => "Power",
            Self::Union => "Union",
            Self::Intersect => "Intersect",
            Self::In => "In",
            Self::Equal => "Equal",
            Self::Greater => "Greater",
            Self::Less => "Less",
            Self::NotIn => "NotIn",
            Self::NotEqual => "NotEqual",
            Self::GreaterEqual => "GreaterEqual",
            Self::LessEqual => "LessEqual",
            Self::Not => "Not",
            Self::Negate => "Negate",
            Self::Magnitude => "Magnitude",
            Self::Substitute => "Substitute",
            Self::Evaluate => "Evaluate",
        };
        write!(f, "{name}")
    }
}

/// Everything an operation needs to construct result values: the canonical
/// cache and the array pool backing vector storage.
pub struct OpContext<'a> {
    /// The canonical value cache; the constructor path for all results.
    pub cache: &'a ValueCache,
    /// The array pool, shared through a `RefCell` since operations only
    /// borrow it while allocating.
    pub pool:  &'a RefCell<ArrayPool<Value>>,
}

/// A concrete binary operation.
///
/// Unary operations use the same shape with an absent right operand. The
/// operator is passed back in so one implementation can serve several
/// registrations. The assignment flag tells the operation whether it may
/// mutate the left operand in place (only legal when the left handle is
/// non-constant) or must allocate the result.
pub type Operation = fn(&OpContext<'_>, Operator, &Value, Option<&Value>, bool) -> OpResult<Value>;

type OpKey = (Operator, Kind, Kind);

/// A registry mapping `(operator, left kind, right kind)` triples to
/// operation implementations.
///
/// Dispatch is on the *exact* runtime kind pair: there is no fallback, so
/// every valid combination, including cross-kind pairs such as
/// discrete and complex, is registered explicitly. A one-entry memo of the
/// last resolved triple skips the table lookup for repeated evaluations of
/// the same kind pair; it is a pure performance optimization and invisible
/// to callers.
pub struct OperatorRegistry {
    table: HashMap<OpKey, Operation>,
    memo:  Cell<Option<(OpKey, Operation)>>,
}

impl OperatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { table: HashMap::new(),
               memo:  Cell::new(None), }
    }

    /// Installs or replaces the implementation for that exact triple.
    pub fn register(&mut self, op: Operator, left: Kind, right: Kind, operation: Operation) {
        self.table.insert((op, left, right), operation);
        self.memo.set(None);
    }

    /// Looks up the implementation for that exact triple, or `None`.
    #[must_use]
    pub fn resolve(&self, op: Operator, left: Kind, right: Kind) -> Option<Operation> {
        let key = (op, left, right);
        if let Some((cached_key, operation)) = self.memo.get()
            && cached_key == key
        {
            return Some(operation);
        }
        let operation = self.table.get(&key).copied()?;
        self.memo.set(Some((key, operation)));
        Some(operation)
    }

    /// Resolves and invokes the operation for the exact runtime kinds of the
    /// operands.
    ///
    /// An absent right operand selects the unary registration for the
    /// operator. The assignment flag is passed through so the operation can
    /// choose in-place mutation versus allocation.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidOperator`] naming the operator and
    /// both type names when no registration matches.
    pub fn invoke(&self,
                  ctx: &OpContext<'_>,
                  op: Operator,
                  left: &Value,
                  right: Option<&Value>,
                  assign: bool)
                  -> OpResult<Value> {
        let left_kind = left.kind();
        let right_kind = right.map_or(Kind::None, Value::kind);
        let Some(operation) = self.resolve(op, left_kind, right_kind) else {
            return Err(RuntimeError::InvalidOperator { op,
                                                       left: left_kind.type_name(),
                                                       right: right_kind.type_name(), });
        };
        operation(ctx, op, left, right, assign)
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
