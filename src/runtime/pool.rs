/// Default maximum number of arrays the pool will hold.
pub const DEFAULT_POOL_SIZE: usize = 128;
/// Default largest array length the pool will accept back.
pub const DEFAULT_MAX_ITEM_SIZE: usize = 64;

/// A bounded freelist of fixed-length arrays.
///
/// Hands out and reclaims arrays to reduce allocation churn for vector
/// storage. This is intentionally a simple cache: a linear scan over the
/// pooled arrays, most recently released first, with no LRU precision.
/// Correctness only requires that a returned array is never shorter than
/// requested and that the pool never grows unbounded.
///
/// Length-zero requests return an empty `Vec`, which does not allocate, so
/// every empty array is effectively the shared empty array.
pub struct ArrayPool<T> {
    pool:          Vec<Vec<T>>,
    pool_size:     usize,
    max_item_size: usize,
}

impl<T: Clone + Default> ArrayPool<T> {
    /// Creates an empty pool with the default bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_bounds(DEFAULT_POOL_SIZE, DEFAULT_MAX_ITEM_SIZE)
    }

    /// Creates an empty pool with explicit bounds.
    ///
    /// `pool_size` caps how many arrays are held; `max_item_size` caps the
    /// length of an array the pool will accept back.
    #[must_use]
    pub const fn with_bounds(pool_size: usize, max_item_size: usize) -> Self {
        Self { pool: Vec::new(),
               pool_size,
               max_item_size }
    }

    /// The maximum number of arrays the pool will hold.
    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Caps how many arrays the pool will hold. Arrays already pooled are
    /// kept; the new bound applies to future releases.
    pub const fn set_pool_size(&mut self, pool_size: usize) {
        self.pool_size = pool_size;
    }

    /// The largest array length the pool will accept back.
    #[must_use]
    pub const fn max_item_size(&self) -> usize {
        self.max_item_size
    }

    /// Caps the length of arrays the pool will accept back.
    pub const fn set_max_item_size(&mut self, max_item_size: usize) {
        self.max_item_size = max_item_size;
    }

    /// How many arrays are currently pooled.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pool.len()
    }

    /// Returns `true` if no arrays are currently pooled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Hands out an array of exactly `length` elements, all defaulted.
    ///
    /// Scans the pool from the most recently released array backwards for an
    /// exact length match and reuses its allocation; otherwise allocates
    /// fresh.
    ///
    /// # Examples
    /// ```
    /// use mathlang::runtime::pool::ArrayPool;
    ///
    /// let mut pool: ArrayPool<i64> = ArrayPool::new();
    /// let array = pool.get(4);
    /// assert_eq!(array.len(), 4);
    /// ```
    #[must_use]
    pub fn get(&mut self, length: usize) -> Vec<T> {
        if length == 0 {
            return Vec::new();
        }
        let found = self.pool
                        .iter()
                        .rposition(|array| array.len() == length);
        if let Some(index) = found {
            let mut array = self.pool.remove(index);
            // Refill in place; the allocation is kept.
            array.clear();
            array.resize(length, T::default());
            return array;
        }
        vec![T::default(); length]
    }

    /// Returns an array to the pool.
    ///
    /// A no-op for empty arrays, for arrays longer than the configured
    /// maximum poolable size, and when the pool is already at capacity; the
    /// array is simply dropped in those cases.
    pub fn release(&mut self, array: Vec<T>) {
        if array.is_empty() {
            return;
        }
        if self.pool.len() >= self.pool_size || array.len() > self.max_item_size {
            return;
        }
        self.pool.push(array);
    }
}

impl<T: Clone + Default> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
