use std::collections::HashMap;

use crate::runtime::value::core::Value;

/// How a declared variable may be rebound or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mutability {
    /// Declared without an explicit mutability keyword.
    #[default]
    None,
    /// The binding and its value are frozen.
    Constant,
    /// The value may be mutated in place.
    Mutable,
}

/// A named binding in a program: a value plus its declared mutability.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variable {
    pub value:      Value,
    pub mutability: Mutability,
}

impl Variable {
    #[must_use]
    pub const fn new(value: Value, mutability: Mutability) -> Self {
        Self { value, mutability }
    }

    /// Whether the bound value may be mutated in place.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        matches!(self.mutability, Mutability::Mutable)
    }
}

/// The variable environment an evaluator threads through execution.
///
/// ## Responsibilities
/// - Stores the variables declared so far, keyed by name.
/// - Hands out shared or mutable references for lookup and assignment.
///
/// Scoping, shadowing and lifetime rules belong to the evaluator; this type
/// is only the storage.
#[derive(Debug, Default)]
pub struct ProgramState {
    variables: HashMap<String, Variable>,
}

impl ProgramState {
    #[must_use]
    pub fn new() -> Self {
        Self { variables: HashMap::new() }
    }

    /// Declares a variable, replacing any previous binding with the name.
    pub fn declare(&mut self, name: impl Into<String>, variable: Variable) {
        self.variables.insert(name.into(), variable);
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Looks up a variable by name for assignment.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Whether a variable with the name has been declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// The number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
