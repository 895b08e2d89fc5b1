/// The core module wires the runtime together.
///
/// Declares the `Runtime` context object that owns the canonical value cache,
/// the operator registry, the array pool and the vector factories, and
/// exposes operator invocation and member/index access as its API.
///
/// # Responsibilities
/// - Constructs and configures all runtime sub-systems.
/// - Routes operator invocations through the registry.
/// - Implements member and index access, including vector growth.
pub mod core;
/// The ops module implements operator dispatch.
///
/// Declares the `Operator` enum, the exact-kind-pair operator registry with
/// its resolution memo, and the built-in operation tables for every value
/// kind.
///
/// # Responsibilities
/// - Resolves `(operator, left kind, right kind)` to an operation.
/// - Registers the boolean, none and numeric tower operations.
/// - Applies numeric promotion and result demotion.
pub mod ops;
/// The pool module amortizes vector storage allocation.
///
/// Declares a bounded freelist of fixed-length arrays. Correctness requires
/// only that a returned array is never shorter than requested and that the
/// pool never grows unbounded; reuse is best-effort.
pub mod pool;
/// The state module holds the thin variable-storage types.
///
/// Declares `Mutability`, `Variable` and `ProgramState`: a name-to-value map
/// with mutability classification, used by an external evaluator to decide
/// whether assignment operations may mutate in place.
pub mod state;
/// The value module defines the runtime data types.
///
/// Declares the `Value` enum and its kinds, the canonical value cache, the
/// numeric handles with their constant/mutable contract, complex numbers and
/// pooled vectors.
///
/// # Responsibilities
/// - Defines the closed set of runtime value kinds and their tower levels.
/// - Provides canonical cached instances and in-place mutation rules.
pub mod value;
