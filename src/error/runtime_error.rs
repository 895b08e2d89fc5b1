use crate::runtime::ops::core::Operator;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised while operating on runtime values.
pub enum RuntimeError {
    /// No operation is registered for this operator and kind combination.
    InvalidOperator {
        /// The operator that failed to resolve.
        op:    Operator,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand (`"none"` for unary invocations).
        right: &'static str,
    },
    /// Member access with a name the kind does not support.
    MissingMember {
        /// The requested member name.
        member:    String,
        /// Type name of the value that was accessed.
        type_name: &'static str,
    },
    /// Member assignment with a value of an unsupported kind.
    InvalidMemberType {
        /// The assigned member name.
        member:    String,
        /// Type name of the value that was assigned to.
        type_name: &'static str,
        /// Type name of the value that was assigned.
        found:     &'static str,
        /// Description of the kinds that would have been accepted.
        expected:  &'static str,
    },
    /// Indexed access with an unsupported arity or index value.
    InvalidIndex {
        /// Type name of the value that was indexed.
        type_name: &'static str,
        /// Details about why the index is invalid.
        details:   String,
    },
    /// Attempted discrete division by zero.
    DivisionByZero,
    /// Attempted discrete exponentiation with a negative exponent.
    NegativeExponent,
    /// Vector construction for an element kind with no registered factory.
    UnconfiguredVectorKind {
        /// Type name of the unregistered element kind.
        kind: &'static str,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperator { op, left, right } => {
                write!(f, "Operator {op} is invalid for {left} and {right}.")
            },
            Self::MissingMember { member, type_name } => {
                write!(f, "Member '{member}' does not exist on {type_name}.")
            },
            Self::InvalidMemberType { member,
                                      type_name,
                                      found,
                                      expected, } => {
                write!(f,
                       "Member '{member}' on {type_name} cannot be set to {found}; expected {expected}.")
            },
            Self::InvalidIndex { type_name, details } => {
                write!(f, "Invalid index into {type_name}: {details}.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::NegativeExponent => {
                write!(f, "Discrete exponentiation with a negative exponent is not defined.")
            },
            Self::UnconfiguredVectorKind { kind } => {
                write!(f, "No vector factory is registered for element kind {kind}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
