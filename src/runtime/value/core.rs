use crate::{
    runtime::value::{
        complex::{Complex, ComplexNumber},
        number::{Discrete, Real},
        vector::Vector,
    },
    util::num::{discrete_to_real, is_integral},
};

/// The concrete runtime variant of a value, used as a dispatch key.
///
/// `Kind` is what the operator registry keys on: dispatch is on the *exact*
/// runtime kind pair, with no inheritance-style fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The "no value" sentinel. Also stands in for an absent right operand
    /// when unary operators are dispatched.
    None,
    /// Boolean values.
    Bool,
    /// 64-bit signed integers.
    Discrete,
    /// IEEE doubles.
    Real,
    /// Complex numbers.
    Complex,
    /// Fixed-length homogeneous vectors.
    Vector,
}

impl Kind {
    /// The type name used in diagnostics.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Discrete => "discrete",
            Self::Real => "real",
            Self::Complex => "complex",
            Self::Vector => "vector",
        }
    }

    /// The position of this kind in the numeric tower
    /// (`Bool < Discrete < Real < Complex`), or `None` for kinds outside it.
    #[must_use]
    pub const fn tower_level(self) -> Option<u8> {
        match self {
            Self::Bool => Some(0),
            Self::Discrete => Some(1),
            Self::Real => Some(2),
            Self::Complex => Some(3),
            Self::None | Self::Vector => None,
        }
    }
}

/// Represents a runtime value.
///
/// This enum models the closed set of value kinds that can appear as
/// operator operands, vector elements and variable contents. Numeric kinds
/// hold shared handles so that canonical constants keep their identity and
/// non-constant instances can be mutated in place by assignment operations.
#[derive(Debug, Clone)]
pub enum Value {
    /// The "no value" sentinel. Equal only to itself.
    None,
    /// A boolean value. The two possible values are process-wide canonical;
    /// operations always return one of them, never a mutation.
    Bool(bool),
    /// A 64-bit signed integer value.
    Discrete(Discrete),
    /// An IEEE double value.
    Real(Real),
    /// A complex value with real and imaginary parts.
    Complex(Complex),
    /// An ordered, fixed-length, homogeneous sequence of numeric values.
    Vector(Vector),
}

impl Value {
    /// The kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::None => Kind::None,
            Self::Bool(_) => Kind::Bool,
            Self::Discrete(_) => Kind::Discrete,
            Self::Real(_) => Kind::Real,
            Self::Complex(_) => Kind::Complex,
            Self::Vector(_) => Kind::Vector,
        }
    }

    /// The type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// The integer payload, for discrete values only.
    #[must_use]
    pub fn as_discrete(&self) -> Option<i64> {
        match self {
            Self::Discrete(d) => Some(d.value()),
            _ => None,
        }
    }

    /// The value viewed at the real tower level.
    ///
    /// Discrete values are promoted by the usual cast; kinds above real (or
    /// outside the tower) yield `None`.
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Discrete(d) => Some(discrete_to_real(d.value())),
            Self::Real(r) => Some(r.value()),
            _ => None,
        }
    }

    /// The value viewed at the complex tower level.
    #[must_use]
    pub fn as_complex(&self) -> Option<ComplexNumber> {
        match self {
            Self::Discrete(d) => Some(ComplexNumber::from(discrete_to_real(d.value()))),
            Self::Real(r) => Some(ComplexNumber::from(r.value())),
            Self::Complex(c) => Some(c.value()),
            _ => None,
        }
    }

    /// Extracts a discrete index from this value, if it carries one.
    ///
    /// A real (or zero-imaginary complex) value counts as discrete when it
    /// is exactly integral; the index contract looks at the value rather
    /// than the kind.
    #[must_use]
    pub fn discrete_index(&self) -> Option<i64> {
        #[allow(clippy::cast_possible_truncation)]
        match self {
            Self::Discrete(d) => Some(d.value()),
            Self::Real(r) if is_integral(r.value()) => Some(r.value() as i64),
            Self::Complex(c) if c.value().is_real() && is_integral(c.value().re) => {
                Some(c.value().re as i64)
            },
            _ => None,
        }
    }

    /// Returns `true` if this value participates in the numeric tower.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.kind().tower_level().is_some()
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::None
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Discrete(a), Self::Discrete(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (Self::Vector(a), Self::Vector(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Discrete(d) => write!(f, "{}", d.value()),
            Self::Real(r) => write!(f, "{}", r.value()),
            Self::Complex(c) => write!(f, "{}", c.value()),
            Self::Vector(v) => {
                write!(f, "[")?;
                for (index, element) in v.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
        }
    }
}
