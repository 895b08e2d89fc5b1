use std::{cell::RefCell, collections::HashMap};

use crate::{
    error::RuntimeError,
    runtime::{
        ops::{
            builtin::register_defaults,
            core::{OpContext, OpResult, Operator, OperatorRegistry},
        },
        pool::ArrayPool,
        value::{
            complex::ComplexNumber,
            core::{Kind, Value},
            number::ValueCache,
            vector::{Vector, VectorFactory, real_vector},
        },
    },
    util::num::to_index,
};

/// Maps a named vector component to its element index.
const fn component_index(member: &str) -> Option<usize> {
    match member.as_bytes() {
        b"x" => Some(0),
        b"y" => Some(1),
        b"z" => Some(2),
        b"w" => Some(3),
        _ => None,
    }
}

/// The runtime context.
///
/// Owns every piece of shared state the value model and the operator engine
/// need: the canonical value cache, the operator registry with its built-in
/// registrations, the array pool backing vector storage, and the per-kind
/// vector factories. All state is explicit and single-owner; nothing lives
/// in ambient statics, so the caller decides the lifecycle.
///
/// ## Usage
///
/// A `Runtime` is created once and reused for evaluating expressions. An
/// external evaluator calls [`Runtime::invoke`] for every binary or unary
/// expression node and the member/index methods for access expressions.
pub struct Runtime {
    cache:            ValueCache,
    registry:         OperatorRegistry,
    pool:             RefCell<ArrayPool<Value>>,
    vector_factories: HashMap<Kind, VectorFactory>,
}

impl Runtime {
    /// Creates a runtime with the built-in operator registrations and the
    /// real-element vector factory installed.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = OperatorRegistry::new();
        register_defaults(&mut registry);

        let mut vector_factories: HashMap<Kind, VectorFactory> = HashMap::new();
        vector_factories.insert(Kind::Real, real_vector);

        Self { cache: ValueCache::new(),
               registry,
               pool: RefCell::new(ArrayPool::new()),
               vector_factories }
    }

    /// The canonical value cache.
    #[must_use]
    pub const fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// The operator registry, for resolving registrations directly.
    #[must_use]
    pub const fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Mutable access to the operator registry, so a host can install or
    /// replace registrations before evaluation begins.
    pub const fn registry_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.registry
    }

    /// The array pool backing vector storage.
    #[must_use]
    pub const fn pool(&self) -> &RefCell<ArrayPool<Value>> {
        &self.pool
    }

    /// Invokes the operation registered for the exact runtime kinds of the
    /// operands.
    ///
    /// This is the entry point an external evaluator uses for every binary
    /// and unary expression node. Passing `None` for `right` selects the
    /// unary registration. The assignment flag permits in-place mutation of
    /// a non-constant left operand; with `assign == false` the operands are
    /// never mutated.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidOperator`] when no operation is
    /// registered for the triple, or whatever error the operation itself
    /// raises (for example [`RuntimeError::DivisionByZero`]).
    ///
    /// # Examples
    /// ```
    /// use mathlang::runtime::{core::Runtime, ops::core::Operator, value::core::Value};
    ///
    /// let runtime = Runtime::new();
    /// let left = Value::Discrete(runtime.cache().discrete(2));
    /// let right = Value::Real(runtime.cache().real(1.5));
    ///
    /// let result = runtime.invoke(Operator::Add, &left, Some(&right), false).unwrap();
    /// assert_eq!(result, Value::Real(runtime.cache().real(3.5)));
    /// ```
    pub fn invoke(&self,
                  op: Operator,
                  left: &Value,
                  right: Option<&Value>,
                  assign: bool)
                  -> OpResult<Value> {
        let ctx = OpContext { cache: &self.cache,
                              pool:  &self.pool, };
        self.registry.invoke(&ctx, op, left, right, assign)
    }

    /// Installs a vector factory for an element kind.
    ///
    /// Registration happens once, before first use; constructing a vector
    /// for a kind with no factory is a configuration error reported by
    /// [`Runtime::new_vector`].
    pub fn register_vector_factory(&mut self, elem_kind: Kind, factory: VectorFactory) {
        self.vector_factories.insert(elem_kind, factory);
    }

    /// Constructs a zero-filled vector of the given element kind and length
    /// on pooled storage.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnconfiguredVectorKind`] when no factory is
    /// registered for `elem_kind`.
    pub fn new_vector(&self, elem_kind: Kind, length: usize) -> OpResult<Vector> {
        let Some(factory) = self.vector_factories.get(&elem_kind) else {
            return Err(RuntimeError::UnconfiguredVectorKind { kind: elem_kind.type_name() });
        };
        Ok(factory(length, &self.cache, &mut self.pool.borrow_mut()))
    }

    /// Returns a vector's backing array to the pool, leaving the vector
    /// empty. Release is scoped and explicit, not automatic.
    pub fn release_vector(&self, vector: &Vector) {
        self.pool.borrow_mut().release(vector.take_storage());
    }

    /// Reads a named member of a value.
    ///
    /// Reals expose their components (`x`/`Re` is the value itself, the
    /// higher components read as zero), complex values expose `Re`/`Im`
    /// (with `x`/`y` aliases), and vectors expose `x`..`w` as their first
    /// four elements. Member access a kind does not support fails rather
    /// than silently succeeding.
    ///
    /// # Errors
    /// Returns [`RuntimeError::MissingMember`] for unsupported members.
    pub fn get_member(&self, value: &Value, member: &str) -> OpResult<Value> {
        match value {
            Value::Real(_) => match member {
                "x" | "Re" => Ok(value.clone()),
                "y" | "z" | "w" | "Im" => Ok(Value::Real(self.cache.real(0.0))),
                _ => Err(missing_member(member, value)),
            },
            Value::Complex(handle) => match member {
                "x" | "Re" => Ok(Value::Real(self.cache.real(handle.value().re))),
                "y" | "Im" => Ok(Value::Real(self.cache.real(handle.value().im))),
                _ => Err(missing_member(member, value)),
            },
            Value::Vector(vector) => component_index(member)
                .map(|index| vector.get(index))
                .ok_or_else(|| missing_member(member, value)),
            _ => Err(missing_member(member, value)),
        }
    }

    /// Writes a named member of a value, returning the value to bind.
    ///
    /// The returned value is the mutated operand itself where the write
    /// fits the kind, or a promoted value where it does not: writing a
    /// nonzero `Im` to a real upgrades it to a complex, and writing
    /// `y`/`z`/`w` promotes it to a real vector with that component set.
    /// Writing a named component past the end of a vector grows it into a
    /// new, larger vector.
    ///
    /// # Errors
    /// Returns [`RuntimeError::MissingMember`] for unsupported members and
    /// [`RuntimeError::InvalidMemberType`] when the assigned value has the
    /// wrong kind.
    pub fn set_member(&self, value: &Value, member: &str, new: &Value) -> OpResult<Value> {
        match value {
            Value::Real(handle) => {
                let component = match member {
                    "x" | "Re" => 0,
                    "y" => 1,
                    "z" => 2,
                    "w" => 3,
                    "Im" => {
                        let im = real_member_value(member, value, new)?;
                        if im == 0.0 {
                            return Ok(value.clone());
                        }
                        return Ok(self.cache.complex(ComplexNumber::new(handle.value(), im)));
                    },
                    _ => return Err(missing_member(member, value)),
                };
                let n = real_member_value(member, value, new)?;
                if component == 0 {
                    return Ok(Value::Real(handle.set_value(n, &self.cache)));
                }
                // Writing a higher spatial component promotes the real into
                // a vector with that many components.
                let vector = self.new_vector(Kind::Real, component + 1)?;
                vector.set(0, Value::Real(self.cache.real(handle.value())));
                vector.set(component, Value::Real(self.cache.real(n)));
                Ok(Value::Vector(vector))
            },
            Value::Complex(handle) => {
                let current = handle.value();
                match member {
                    "x" | "Re" => {
                        let n = real_member_value(member, value, new)?;
                        Ok(handle.set_value(ComplexNumber::new(n, current.im), &self.cache))
                    },
                    "y" | "Im" => {
                        let n = real_member_value(member, value, new)?;
                        Ok(handle.set_value(ComplexNumber::new(current.re, n), &self.cache))
                    },
                    _ => Err(missing_member(member, value)),
                }
            },
            Value::Vector(vector) => {
                let Some(index) = component_index(member) else {
                    return Err(missing_member(member, value));
                };
                if new.kind() != vector.elem_kind() {
                    return Err(RuntimeError::InvalidMemberType {
                        member:    member.to_string(),
                        type_name: value.type_name(),
                        found:     new.type_name(),
                        expected:  vector.elem_kind().type_name(),
                    });
                }
                if index < vector.len() {
                    vector.set(index, new.clone());
                    return Ok(value.clone());
                }
                // Out-of-range named write grows into a new, larger vector.
                let grown = self.new_vector(vector.elem_kind(), index + 1)?;
                for (i, element) in vector.iter().enumerate() {
                    grown.set(i, element);
                }
                grown.set(index, new.clone());
                Ok(Value::Vector(grown))
            },
            _ => Err(missing_member(member, value)),
        }
    }

    /// Reads an indexed element of a value.
    ///
    /// Vectors take exactly one non-negative discrete index; an out-of-range
    /// read returns [`Value::None`] rather than an error.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidIndex`] for unsupported kinds, wrong
    /// arity, or a non-discrete or negative index.
    pub fn get_index(&self, value: &Value, indices: &[Value]) -> OpResult<Value> {
        let Value::Vector(vector) = value else {
            return Err(invalid_index(value, "indexed access is not supported"));
        };
        Ok(vector.get(checked_index(value, indices)?))
    }

    /// Writes an indexed element of a value, returning the value itself.
    ///
    /// Unlike named-component writes, an out-of-range indexed write is an
    /// error; growth is a named-component behavior only.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidIndex`] for unsupported kinds, bad
    /// indices or out-of-range writes, and
    /// [`RuntimeError::InvalidMemberType`] when the element kind does not
    /// match.
    pub fn set_index(&self, value: &Value, indices: &[Value], new: &Value) -> OpResult<Value> {
        let Value::Vector(vector) = value else {
            return Err(invalid_index(value, "indexed access is not supported"));
        };
        let index = checked_index(value, indices)?;
        if new.kind() != vector.elem_kind() {
            return Err(RuntimeError::InvalidMemberType {
                member:    index.to_string(),
                type_name: value.type_name(),
                found:     new.type_name(),
                expected:  vector.elem_kind().type_name(),
            });
        }
        if index >= vector.len() {
            return Err(invalid_index(value, "index is out of range for assignment"));
        }
        vector.set(index, new.clone());
        Ok(value.clone())
    }

}

fn checked_index(value: &Value, indices: &[Value]) -> OpResult<usize> {
    if indices.len() != 1 {
        return Err(invalid_index(value,
                                 &format!("expected exactly 1 index, found {}", indices.len())));
    }
    indices[0].discrete_index()
              .and_then(to_index)
              .ok_or_else(|| invalid_index(value, "index must be a non-negative discrete value"))
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_member(member: &str, value: &Value) -> RuntimeError {
    RuntimeError::MissingMember { member:    member.to_string(),
                                  type_name: value.type_name(), }
}

fn invalid_index(value: &Value, details: &str) -> RuntimeError {
    RuntimeError::InvalidIndex { type_name: value.type_name(),
                                 details:   details.to_string(), }
}

fn real_member_value(member: &str, target: &Value, new: &Value) -> OpResult<f64> {
    new.as_real().ok_or_else(|| RuntimeError::InvalidMemberType {
        member:    member.to_string(),
        type_name: target.type_name(),
        found:     new.type_name(),
        expected:  "a real-valued number",
    })
}
