use std::{cell::RefCell, rc::Rc};

use crate::runtime::{
    pool::ArrayPool,
    value::{
        core::{Kind, Value},
        number::ValueCache,
    },
};

/// Constructs a vector of the given length with all elements zeroed.
///
/// A factory must be registered on the runtime once per element kind before
/// vectors of that kind can be built; see
/// [`crate::runtime::core::Runtime::register_vector_factory`].
pub type VectorFactory = fn(usize, &ValueCache, &mut ArrayPool<Value>) -> Vector;

/// An ordered, fixed-length, homogeneous sequence of numeric values.
///
/// Backed by pooled storage. The handle is shared; element writes go through
/// the runtime so homogeneity is enforced, and the backing array is returned
/// to the pool explicitly via
/// [`crate::runtime::core::Runtime::release_vector`], not on drop.
#[derive(Debug, Clone)]
pub struct Vector {
    repr: Rc<RefCell<VectorRepr>>,
}

#[derive(Debug)]
struct VectorRepr {
    elem_kind: Kind,
    elems:     Vec<Value>,
}

impl Vector {
    pub(crate) fn from_storage(elem_kind: Kind, elems: Vec<Value>) -> Self {
        Self { repr: Rc::new(RefCell::new(VectorRepr { elem_kind, elems })), }
    }

    /// The kind every element of this vector has.
    #[must_use]
    pub fn elem_kind(&self) -> Kind {
        self.repr.borrow().elem_kind
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repr.borrow().elems.len()
    }

    /// Returns `true` if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the element at `index`.
    ///
    /// An out-of-range read returns [`Value::None`] rather than an error;
    /// that is part of the vector read contract.
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.repr
            .borrow()
            .elems
            .get(index)
            .cloned()
            .unwrap_or(Value::None)
    }

    /// Replaces the element at `index`. The caller has already validated the
    /// index range and the element kind.
    pub(crate) fn set(&self, index: usize, value: Value) {
        self.repr.borrow_mut().elems[index] = value;
    }

    /// Returns `true` if both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.repr, &other.repr)
    }

    /// Iterates over a snapshot of the elements.
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.repr.borrow().elems.clone().into_iter()
    }

    /// Takes the backing storage out of the vector, leaving it empty. Used
    /// when the storage is handed back to the pool.
    pub(crate) fn take_storage(&self) -> Vec<Value> {
        std::mem::take(&mut self.repr.borrow_mut().elems)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.elem_kind() == other.elem_kind()
        && self.repr.borrow().elems == other.repr.borrow().elems
    }
}

/// The factory for vectors of real elements, pre-registered on every
/// runtime. Elements start as the canonical real zero.
#[must_use]
pub fn real_vector(length: usize, cache: &ValueCache, pool: &mut ArrayPool<Value>) -> Vector {
    let mut elems = pool.get(length);
    for slot in &mut elems {
        *slot = Value::Real(cache.real(0.0));
    }
    Vector::from_storage(Kind::Real, elems)
}
