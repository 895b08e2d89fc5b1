use std::{cell::Cell, collections::HashMap, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    runtime::{
        ops::core::{OpResult, Operator},
        value::{
            complex::{Complex, ComplexNumber, I},
            core::Value,
        },
    },
};

/// A runtime handle to a 64-bit signed integer value.
///
/// The canonical instances `0` and `1` are shared and constant; all other
/// instances are uniquely owned by their binding. Constant handles are never
/// mutated, [`Discrete::set_value`] returns a fresh instance for them.
#[derive(Debug, Clone)]
pub struct Discrete {
    repr: Rc<DiscreteRepr>,
}

#[derive(Debug)]
struct DiscreteRepr {
    value:    Cell<i64>,
    constant: bool,
}

impl Discrete {
    fn with_flag(value: i64, constant: bool) -> Self {
        Self { repr: Rc::new(DiscreteRepr { value: Cell::new(value),
                                            constant }), }
    }

    /// The current integer value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.repr.value.get()
    }

    /// Whether this handle is a shared canonical constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.repr.constant
    }

    /// Returns `true` if both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.repr, &other.repr)
    }

    /// Replaces the value, mutating in place when this handle is mutable.
    ///
    /// Returns the same handle (mutated) for non-constant instances, and a
    /// cache-constructed instance for constant ones, so canonical values are
    /// never changed underneath their other holders.
    #[must_use]
    pub fn set_value(&self, new: i64, cache: &ValueCache) -> Self {
        if self.value() == new {
            return self.clone();
        }
        if self.repr.constant {
            return cache.discrete(new);
        }
        self.repr.value.set(new);
        self.clone()
    }

    /// Integer exponentiation by repeated multiplication.
    ///
    /// The exponent must be non-negative; intermediate products wrap on
    /// overflow like every other discrete operation.
    #[must_use]
    pub const fn pow(base: i64, mut exponent: i64) -> i64 {
        let mut ret = 1_i64;
        while exponent > 0 {
            ret = ret.wrapping_mul(base);
            exponent -= 1;
        }
        ret
    }

    /// The pure binary operation table for discrete values.
    ///
    /// Returns `Ok(None)` when the operator has no discrete arithmetic
    /// meaning (the engine then consults [`Discrete::test`]). Division by
    /// zero and negative exponents are explicit errors rather than
    /// undefined behavior.
    pub const fn binary(op: Operator, left: i64, right: i64) -> OpResult<Option<i64>> {
        Ok(match op {
            Operator::Add => Some(left.wrapping_add(right)),
            Operator::Subtract => Some(left.wrapping_sub(right)),
            Operator::Multiply => Some(left.wrapping_mul(right)),
            Operator::Divide => {
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                // C-style truncating integer division.
                Some(left.wrapping_div(right))
            },
            Operator::Power => {
                if right < 0 {
                    return Err(RuntimeError::NegativeExponent);
                }
                Some(Self::pow(left, right))
            },
            _ => None,
        })
    }

    /// The pure comparison table for discrete values.
    #[must_use]
    pub const fn test(op: Operator, left: i64, right: i64) -> Option<bool> {
        match op {
            Operator::In | Operator::Equal => Some(left == right),
            Operator::NotIn | Operator::NotEqual => Some(left != right),
            Operator::Greater => Some(left > right),
            Operator::Less => Some(left < right),
            Operator::GreaterEqual => Some(left >= right),
            Operator::LessEqual => Some(left <= right),
            _ => None,
        }
    }

    /// The pure unary table for discrete values.
    ///
    /// `Substitute` and `Evaluate` are identity at this layer; there are no
    /// free variables in a leaf value.
    #[must_use]
    pub const fn unary(op: Operator, value: i64) -> Option<i64> {
        match op {
            Operator::Substitute | Operator::Evaluate => Some(value),
            Operator::Magnitude => Some(value.wrapping_abs()),
            Operator::Negate => Some(value.wrapping_neg()),
            _ => None,
        }
    }
}

impl PartialEq for Discrete {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

/// A runtime handle to an IEEE double value.
///
/// Canonical instances exist for `0`, the smallest positive double, `NaN`,
/// both infinities, `1` and `-1`. The constant/mutable contract matches
/// [`Discrete`].
#[derive(Debug, Clone)]
pub struct Real {
    repr: Rc<RealRepr>,
}

#[derive(Debug)]
struct RealRepr {
    value:    Cell<f64>,
    constant: bool,
}

impl Real {
    fn with_flag(value: f64, constant: bool) -> Self {
        Self { repr: Rc::new(RealRepr { value: Cell::new(value),
                                        constant }), }
    }

    /// The current floating-point value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.repr.value.get()
    }

    /// Whether this handle is a shared canonical constant.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.repr.constant
    }

    /// Returns `true` if both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.repr, &other.repr)
    }

    /// Replaces the value, mutating in place when this handle is mutable.
    ///
    /// Constant handles are never mutated; a cache-constructed instance is
    /// returned instead.
    #[must_use]
    pub fn set_value(&self, new: f64, cache: &ValueCache) -> Self {
        if self.value() == new {
            return self.clone();
        }
        if self.repr.constant {
            return cache.real(new);
        }
        self.repr.value.set(new);
        self.clone()
    }

    /// The pure binary operation table for real values.
    ///
    /// Division follows IEEE semantics (a zero divisor yields an infinity or
    /// `NaN`); only discrete division guards against zero.
    #[must_use]
    pub fn binary(op: Operator, left: f64, right: f64) -> Option<f64> {
        match op {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => Some(left / right),
            Operator::Power => Some(left.powf(right)),
            _ => None,
        }
    }

    /// The pure comparison table for real values.
    #[must_use]
    pub fn test(op: Operator, left: f64, right: f64) -> Option<bool> {
        match op {
            Operator::In | Operator::Equal => Some(left == right),
            Operator::NotIn | Operator::NotEqual => Some(left != right),
            Operator::Greater => Some(left > right),
            Operator::Less => Some(left < right),
            Operator::GreaterEqual => Some(left >= right),
            Operator::LessEqual => Some(left <= right),
            _ => None,
        }
    }

    /// The pure unary table for real values.
    #[must_use]
    pub fn unary(op: Operator, value: f64) -> Option<f64> {
        match op {
            Operator::Substitute | Operator::Evaluate => Some(value),
            Operator::Magnitude => Some(value.abs()),
            Operator::Negate => Some(-value),
            _ => None,
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.value()) == OrderedFloat(other.value())
    }
}

/// The canonical value cache.
///
/// Holds the process-lifetime shared instances for common constants and acts
/// as the constructor for every engine-produced value. Created explicitly by
/// the caller (usually inside a [`crate::runtime::core::Runtime`]) instead of
/// living in ambient statics.
pub struct ValueCache {
    discrete_zero: Discrete,
    discrete_one:  Discrete,
    reals:         HashMap<OrderedFloat<f64>, Real>,
    complex_i:     Complex,
}

impl ValueCache {
    /// Creates the cache and populates the canonical instances.
    #[must_use]
    pub fn new() -> Self {
        // 5e-324 is the smallest positive subnormal double.
        let reals = [0.0, 5e-324, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0, -1.0]
            .into_iter()
            .map(|v| (OrderedFloat(v), Real::with_flag(v, true)))
            .collect();

        Self { discrete_zero: Discrete::with_flag(0, true),
               discrete_one:  Discrete::with_flag(1, true),
               reals,
               complex_i:     Complex::with_flag(I, true), }
    }

    /// Returns the canonical or a fresh discrete handle for `value`.
    ///
    /// `0` and `1` come back as clones of the shared constant instances;
    /// every other value is a fresh, mutable handle.
    #[must_use]
    pub fn discrete(&self, value: i64) -> Discrete {
        match value {
            0 => self.discrete_zero.clone(),
            1 => self.discrete_one.clone(),
            _ => Discrete::with_flag(value, false),
        }
    }

    /// Returns the canonical or a fresh real handle for `value`.
    ///
    /// `NaN` hits the canonical `NaN` entry; `OrderedFloat` makes that
    /// lookup total.
    #[must_use]
    pub fn real(&self, value: f64) -> Real {
        self.reals
            .get(&OrderedFloat(value))
            .cloned()
            .unwrap_or_else(|| Real::with_flag(value, false))
    }

    /// The single authoritative complex constructor.
    ///
    /// A value with zero imaginary part demotes to [`Value::Real`]; `i`
    /// comes back as the shared canonical instance. This is the only path
    /// engine results take, which is what guarantees the demotion law.
    #[must_use]
    pub fn complex(&self, value: ComplexNumber) -> Value {
        if value.is_real() {
            return Value::Real(self.real(value.re));
        }
        if value == I {
            return Value::Complex(self.complex_i.clone());
        }
        Value::Complex(Complex::with_flag(value, false))
    }
}

impl Default for ValueCache {
    fn default() -> Self {
        Self::new()
    }
}
