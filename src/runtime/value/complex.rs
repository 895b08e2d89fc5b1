use std::{
    cell::Cell,
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
    rc::Rc,
};

use ordered_float::OrderedFloat;

use crate::runtime::{
    ops::core::Operator,
    value::{core::Value, number::ValueCache},
};

/// The imaginary unit `i`.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub re: f64,
    /// The imaginary part of the number.
    pub im: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.re, self.im) {
            (0.0, 0.0) => write!(f, "0"),
            (re, 0.0) => write!(f, "{re}"),
            (0.0, im) => write!(f, "{im}i"),
            (re, im) if im > 0.0 => write!(f, "{re} + {im}i"),
            (re, im) => write!(f, "{re} - {}i", -im),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Examples
    /// ```
    /// use mathlang::runtime::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.re, 5.0);
    /// assert_eq!(c.im, -1.0);
    /// ```
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `true` if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    /// Returns the magnitude (absolute value) of the complex number.
    ///
    /// # Examples
    /// ```
    /// use mathlang::runtime::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.magnitude(), 5.0);
    /// ```
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// The pure binary operation table for complex values.
    ///
    /// `Power` is not defined at this level, so mixed-kind exponentiation
    /// fails to resolve instead of producing an approximate answer.
    #[must_use]
    pub fn binary(op: Operator, left: Self, right: Self) -> Option<Self> {
        match op {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => Some(left / right),
            _ => None,
        }
    }

    /// The pure comparison table for complex values.
    ///
    /// Ordering comparisons are absent: the complex numbers are not totally
    /// ordered, and the engine reports them as invalid.
    #[must_use]
    pub fn test(op: Operator, left: Self, right: Self) -> Option<bool> {
        match op {
            Operator::In | Operator::Equal => Some(left == right),
            Operator::NotIn | Operator::NotEqual => Some(left != right),
            _ => None,
        }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { re: -self.re,
               im: -self.im, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { re: self.re + rhs.re,
               im: self.im + rhs.im, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { re: self.re - rhs.re,
               im: self.im - rhs.im, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { re: self.re.mul_add(rhs.re, -(self.im * rhs.im)),
               im: self.re.mul_add(rhs.im, self.im * rhs.re), }
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.re.mul_add(rhs.re, rhs.im * rhs.im);
        Self { re: self.re.mul_add(rhs.re, self.im * rhs.im) / denom,
               im: self.im.mul_add(rhs.re, -(self.re * rhs.im)) / denom, }
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { re: value.into(),
               im: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.re) == OrderedFloat(other.re)
        && OrderedFloat(self.im) == OrderedFloat(other.im)
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.re).hash(state);
        OrderedFloat(self.im).hash(state);
    }
}

/// A runtime handle to a complex value.
///
/// Canonical instances (`0` and `i`) are shared and constant; everything else
/// is uniquely owned by its binding and may be mutated in place through
/// [`Complex::set_value`]. The magnitude is computed lazily and invalidated
/// on mutation.
#[derive(Debug, Clone)]
pub struct Complex {
    repr: Rc<ComplexRepr>,
}

#[derive(Debug)]
struct ComplexRepr {
    value:     Cell<ComplexNumber>,
    // Negative sentinel marks the cached magnitude as stale.
    magnitude: Cell<f64>,
    constant:  bool,
}

impl Complex {
    pub(crate) fn with_flag(value: ComplexNumber, constant: bool) -> Self {
        Self { repr: Rc::new(ComplexRepr { value: Cell::new(value),
                                           magnitude: Cell::new(-1.0),
                                           constant }), }
    }

    /// Constructs a fresh, non-constant complex handle.
    ///
    /// This bypasses the cache's demotion rule on purpose, so a host can
    /// build a `Complex` with zero imaginary part when it needs one; results
    /// computed by the operator engine always go through
    /// [`ValueCache::complex`] instead.
    #[must_use]
    pub fn from_parts(re: f64, im: f64) -> Self {
        Self::with_flag(ComplexNumber::new(re, im), false)
    }

    /// The current complex value.
    #[must_use]
    pub fn value(&self) -> ComplexNumber {
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

    /// The magnitude of the value, computed on first use and cached until
    /// the value is mutated.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let cached = self.repr.magnitude.get();
        if cached >= 0.0 {
            return cached;
        }
        let magnitude = self.value().magnitude();
        self.repr.magnitude.set(magnitude);
        magnitude
    }

    /// Replaces the value, mutating in place when this handle is mutable.
    ///
    /// Constant handles are never mutated; a cache-constructed instance is
    /// returned instead. A new value with zero imaginary part demotes to a
    /// [`Value::Real`] through the cache, whichever path is taken.
    #[must_use]
    pub fn set_value(&self, new: ComplexNumber, cache: &ValueCache) -> Value {
        if self.value() == new {
            return Value::Complex(self.clone());
        }
        if self.repr.constant || new.is_real() {
            return cache.complex(new);
        }
        self.repr.value.set(new);
        self.repr.magnitude.set(-1.0);
        Value::Complex(self.clone())
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}
