use mathlang::{
    error::RuntimeError,
    runtime::{
        core::Runtime,
        ops::core::Operator,
        pool::ArrayPool,
        state::{Mutability, ProgramState, Variable},
        value::{
            complex::{Complex, ComplexNumber},
            core::{Kind, Value},
        },
    },
};

fn discrete(runtime: &Runtime, value: i64) -> Value {
    Value::Discrete(runtime.cache().discrete(value))
}

fn real(runtime: &Runtime, value: f64) -> Value {
    Value::Real(runtime.cache().real(value))
}

fn complex(re: f64, im: f64) -> Value {
    Value::Complex(Complex::from_parts(re, im))
}

fn eval(runtime: &Runtime, op: Operator, left: &Value, right: &Value) -> Value {
    runtime.invoke(op, left, Some(right), false)
           .unwrap_or_else(|e| panic!("{op} on {left} and {right} failed: {e}"))
}

fn eval_unary(runtime: &Runtime, op: Operator, left: &Value) -> Value {
    runtime.invoke(op, left, None, false)
           .unwrap_or_else(|e| panic!("{op} on {left} failed: {e}"))
}

fn expect_bool(runtime: &Runtime, op: Operator, left: &Value, right: &Value, expected: bool) {
    assert_eq!(eval(runtime, op, left, right),
               Value::Bool(expected),
               "{op} on {left} and {right}");
}

#[test]
fn discrete_arithmetic_stays_discrete() {
    let runtime = Runtime::new();

    let result = eval(&runtime, Operator::Add, &discrete(&runtime, 2), &discrete(&runtime, 3));
    assert_eq!(result.kind(), Kind::Discrete);
    assert_eq!(result, discrete(&runtime, 5));

    let result = eval(&runtime, Operator::Power, &discrete(&runtime, 2), &discrete(&runtime, 10));
    assert_eq!(result, discrete(&runtime, 1024));

    // Integer division truncates.
    let result = eval(&runtime, Operator::Divide, &discrete(&runtime, 7), &discrete(&runtime, 2));
    assert_eq!(result, discrete(&runtime, 3));
}

#[test]
fn mixed_operands_promote_to_the_wider_kind() {
    let runtime = Runtime::new();

    let result = eval(&runtime, Operator::Add, &discrete(&runtime, 2), &real(&runtime, 1.5));
    assert_eq!(result, real(&runtime, 3.5));

    let result = eval(&runtime, Operator::Multiply, &real(&runtime, 2.0), &complex(1.0, 1.0));
    assert_eq!(result, complex(2.0, 2.0));

    let result = eval(&runtime, Operator::Subtract, &complex(1.0, 1.0), &discrete(&runtime, 1));
    assert_eq!(result, complex(0.0, 1.0));
}

#[test]
fn complex_results_with_zero_imaginary_part_demote() {
    let runtime = Runtime::new();
    let i = complex(0.0, 1.0);

    // i * i = -1, which is real.
    let result = eval(&runtime, Operator::Multiply, &i, &i);
    assert_eq!(result.kind(), Kind::Real);
    assert_eq!(result, real(&runtime, -1.0));

    let result = eval(&runtime, Operator::Add, &complex(2.0, 3.0), &complex(1.0, -3.0));
    assert_eq!(result, real(&runtime, 3.0));
}

#[test]
fn equality_compares_across_the_numeric_tower() {
    let runtime = Runtime::new();

    expect_bool(&runtime, Operator::Equal, &complex(2.0, 0.0), &discrete(&runtime, 2), true);
    expect_bool(&runtime, Operator::Equal, &discrete(&runtime, 2), &real(&runtime, 2.0), true);
    expect_bool(&runtime, Operator::NotEqual, &discrete(&runtime, 2), &real(&runtime, 2.5), true);
    expect_bool(&runtime, Operator::Equal, &complex(2.0, 1.0), &complex(2.0, 1.0), true);
}

#[test]
fn negated_comparisons_mirror_their_positive_forms() {
    let runtime = Runtime::new();
    let pairs = [(2_i64, 2_i64), (2, 3), (-4, 4)];

    for (a, b) in pairs {
        let left = discrete(&runtime, a);
        let right = discrete(&runtime, b);

        expect_bool(&runtime, Operator::Equal, &left, &right, a == b);
        expect_bool(&runtime, Operator::NotEqual, &left, &right, a != b);
        // Scalar membership coincides with equality.
        expect_bool(&runtime, Operator::In, &left, &right, a == b);
        expect_bool(&runtime, Operator::NotIn, &left, &right, a != b);
        expect_bool(&runtime, Operator::GreaterEqual, &left, &right, a >= b);
        expect_bool(&runtime, Operator::Less, &left, &right, a < b);
    }
}

#[test]
fn complex_values_have_no_ordering() {
    let runtime = Runtime::new();

    let result = runtime.invoke(Operator::Greater, &complex(1.0, 1.0), Some(&complex(0.0, 1.0)), false);
    assert!(matches!(result, Err(RuntimeError::InvalidOperator { .. })), "got {result:?}");

    // An ordering against a real still promotes to complex first.
    let result = runtime.invoke(Operator::Less, &real(&runtime, 1.0), Some(&complex(0.0, 1.0)), false);
    assert!(matches!(result, Err(RuntimeError::InvalidOperator { .. })));
}

#[test]
fn discrete_division_and_exponent_edge_cases() {
    let runtime = Runtime::new();

    let result = runtime.invoke(Operator::Divide, &discrete(&runtime, 1), Some(&discrete(&runtime, 0)), false);
    assert_eq!(result, Err(RuntimeError::DivisionByZero));

    let result = runtime.invoke(Operator::Power, &discrete(&runtime, 2), Some(&discrete(&runtime, -1)), false);
    assert_eq!(result, Err(RuntimeError::NegativeExponent));

    // Real division follows IEEE instead of erroring.
    let result = eval(&runtime, Operator::Divide, &real(&runtime, 1.0), &real(&runtime, 0.0));
    assert_eq!(result, real(&runtime, f64::INFINITY));
}

#[test]
fn boolean_operation_table() {
    let runtime = Runtime::new();
    let table: [(Operator, fn(bool, bool) -> bool); 5] =
        [(Operator::Add, |a, b| a | b),
         (Operator::Union, |a, b| a | b),
         (Operator::Multiply, |a, b| a & b),
         (Operator::Intersect, |a, b| a & b),
         (Operator::Power, |a, b| a ^ b)];

    for (op, expected) in table {
        for a in [false, true] {
            for b in [false, true] {
                expect_bool(&runtime, op, &Value::Bool(a), &Value::Bool(b), expected(a, b));
            }
        }
    }

    // Orderings treat true > false.
    expect_bool(&runtime, Operator::Greater, &Value::Bool(true), &Value::Bool(false), true);
    expect_bool(&runtime, Operator::Greater, &Value::Bool(true), &Value::Bool(true), false);
    expect_bool(&runtime, Operator::LessEqual, &Value::Bool(false), &Value::Bool(true), true);

    assert_eq!(eval_unary(&runtime, Operator::Not, &Value::Bool(true)), Value::Bool(false));
    assert_eq!(eval_unary(&runtime, Operator::Not, &Value::Bool(false)), Value::Bool(true));
}

#[test]
fn none_compares_equal_to_none_only() {
    let runtime = Runtime::new();

    expect_bool(&runtime, Operator::Equal, &Value::None, &Value::None, true);
    expect_bool(&runtime, Operator::NotEqual, &Value::None, &Value::None, false);
    expect_bool(&runtime, Operator::In, &Value::None, &Value::None, true);

    // Nothing else is registered for none operands.
    let result = runtime.invoke(Operator::Add, &Value::None, Some(&Value::None), false);
    assert!(matches!(result, Err(RuntimeError::InvalidOperator { .. })));
    let result = runtime.invoke(Operator::Equal, &Value::None, Some(&discrete(&runtime, 0)), false);
    assert!(matches!(result, Err(RuntimeError::InvalidOperator { .. })));
}

#[test]
fn unary_operations() {
    let runtime = Runtime::new();

    assert_eq!(eval_unary(&runtime, Operator::Negate, &discrete(&runtime, 5)),
               discrete(&runtime, -5));
    assert_eq!(eval_unary(&runtime, Operator::Magnitude, &discrete(&runtime, -5)),
               discrete(&runtime, 5));
    assert_eq!(eval_unary(&runtime, Operator::Magnitude, &real(&runtime, -2.5)),
               real(&runtime, 2.5));
    assert_eq!(eval_unary(&runtime, Operator::Magnitude, &complex(3.0, 4.0)),
               real(&runtime, 5.0));
    assert_eq!(eval_unary(&runtime, Operator::Negate, &complex(1.0, -2.0)), complex(-1.0, 2.0));

    // Substitution and evaluation are identity on leaf values.
    let x = real(&runtime, 1.5);
    assert_eq!(eval_unary(&runtime, Operator::Substitute, &x), x);
    assert_eq!(eval_unary(&runtime, Operator::Evaluate, &x), x);
}

#[test]
fn canonical_instances_are_shared() {
    let runtime = Runtime::new();
    let cache = runtime.cache();

    assert!(cache.discrete(0).ptr_eq(&cache.discrete(0)));
    assert!(cache.discrete(1).ptr_eq(&cache.discrete(1)));
    assert!(!cache.discrete(2).ptr_eq(&cache.discrete(2)));

    assert!(cache.real(0.0).ptr_eq(&cache.real(0.0)));
    assert!(cache.real(f64::NAN).ptr_eq(&cache.real(f64::NAN)));
    // The canonical epsilon is the smallest positive subnormal, not the
    // smallest normal.
    assert!(cache.real(5e-324).ptr_eq(&cache.real(5e-324)));
    assert!(!cache.real(f64::MIN_POSITIVE).ptr_eq(&cache.real(f64::MIN_POSITIVE)));
    assert!(!cache.real(2.5).ptr_eq(&cache.real(2.5)));

    assert!(cache.discrete(0).is_constant());
    assert!(!cache.discrete(7).is_constant());
}

#[test]
fn constants_are_never_mutated_in_place() {
    let runtime = Runtime::new();
    let cache = runtime.cache();

    let zero = cache.discrete(0);
    let changed = zero.set_value(42, cache);
    assert!(!zero.ptr_eq(&changed));
    assert_eq!(zero.value(), 0);
    assert_eq!(changed.value(), 42);

    // Setting the value a constant already holds hands back the constant.
    let same = zero.set_value(0, cache);
    assert!(zero.ptr_eq(&same));
}

#[test]
fn operands_are_untouched_without_the_assignment_flag() {
    let runtime = Runtime::new();

    let left = discrete(&runtime, 5);
    let result = eval(&runtime, Operator::Add, &left, &discrete(&runtime, 3));
    assert_eq!(left, discrete(&runtime, 5));
    assert_eq!(result, discrete(&runtime, 8));
    if let (Value::Discrete(a), Value::Discrete(b)) = (&left, &result) {
        assert!(!a.ptr_eq(b));
    } else {
        panic!("Expected discrete operands");
    }
}

#[test]
fn assignment_mutates_a_mutable_left_operand_in_place() {
    let runtime = Runtime::new();

    let left = discrete(&runtime, 5);
    let result = runtime.invoke(Operator::Add, &left, Some(&discrete(&runtime, 3)), true)
                        .unwrap();
    assert_eq!(left, discrete(&runtime, 8));
    if let (Value::Discrete(a), Value::Discrete(b)) = (&left, &result) {
        assert!(a.ptr_eq(b));
    } else {
        panic!("Expected discrete operands");
    }

    let left = real(&runtime, 2.5);
    let result = runtime.invoke(Operator::Negate, &left, None, true).unwrap();
    assert_eq!(result, real(&runtime, -2.5));
    if let (Value::Real(a), Value::Real(b)) = (&left, &result) {
        assert!(a.ptr_eq(b));
    } else {
        panic!("Expected real operands");
    }
}

#[test]
fn assignment_cannot_mutate_across_kinds() {
    let runtime = Runtime::new();

    // The result is real, so the discrete left operand stays as it was.
    let left = discrete(&runtime, 2);
    let result = runtime.invoke(Operator::Add, &left, Some(&real(&runtime, 0.5)), true)
                        .unwrap();
    assert_eq!(left, discrete(&runtime, 2));
    assert_eq!(result, real(&runtime, 2.5));
}

#[test]
fn complex_mutation_keeps_identity_until_demotion() {
    let runtime = Runtime::new();

    let left = complex(1.0, 2.0);
    let result = runtime.invoke(Operator::Add, &left, Some(&complex(1.0, 1.0)), true)
                        .unwrap();
    assert_eq!(result, complex(2.0, 3.0));
    if let (Value::Complex(a), Value::Complex(b)) = (&left, &result) {
        assert!(a.ptr_eq(b));
        // The cached magnitude was invalidated by the write.
        assert!((a.magnitude() - 13.0_f64.sqrt()).abs() < 1e-12);
    } else {
        panic!("Expected complex operands");
    }

    // A zero imaginary part forces the result out of the complex kind even
    // under assignment.
    let result = runtime.invoke(Operator::Subtract, &left, Some(&complex(0.0, 3.0)), true)
                        .unwrap();
    assert_eq!(result, real(&runtime, 2.0));
    assert_eq!(left, complex(2.0, 3.0));
}

#[test]
fn real_members() {
    let runtime = Runtime::new();
    let x = real(&runtime, 2.5);

    assert_eq!(runtime.get_member(&x, "x").unwrap(), x);
    assert_eq!(runtime.get_member(&x, "Re").unwrap(), x);
    assert_eq!(runtime.get_member(&x, "Im").unwrap(), real(&runtime, 0.0));
    assert_eq!(runtime.get_member(&x, "z").unwrap(), real(&runtime, 0.0));
    assert!(matches!(runtime.get_member(&x, "nope"),
                     Err(RuntimeError::MissingMember { .. })));

    // Writing a nonzero imaginary part upgrades the value to complex.
    let upgraded = runtime.set_member(&x, "Im", &real(&runtime, 1.0)).unwrap();
    assert_eq!(upgraded, complex(2.5, 1.0));
    // Writing zero leaves it real.
    assert_eq!(runtime.set_member(&x, "Im", &real(&runtime, 0.0)).unwrap(), x);

    // Writing a spatial component promotes to a vector sized to reach it.
    let promoted = runtime.set_member(&x, "z", &real(&runtime, 7.0)).unwrap();
    let Value::Vector(vector) = &promoted else {
        panic!("Expected a vector, got {promoted}");
    };
    assert_eq!(vector.len(), 3);
    assert_eq!(vector.get(0), real(&runtime, 2.5));
    assert_eq!(vector.get(1), real(&runtime, 0.0));
    assert_eq!(vector.get(2), real(&runtime, 7.0));
}

#[test]
fn complex_members() {
    let runtime = Runtime::new();
    let z = complex(3.0, 4.0);

    assert_eq!(runtime.get_member(&z, "Re").unwrap(), real(&runtime, 3.0));
    assert_eq!(runtime.get_member(&z, "Im").unwrap(), real(&runtime, 4.0));

    let rotated = runtime.set_member(&z, "Re", &real(&runtime, -3.0)).unwrap();
    assert_eq!(rotated, complex(-3.0, 4.0));

    // Clearing the imaginary part demotes to a real.
    let demoted = runtime.set_member(&z, "Im", &real(&runtime, 0.0)).unwrap();
    assert_eq!(demoted, real(&runtime, -3.0));

    let result = runtime.set_member(&z, "Re", &Value::Bool(true));
    assert!(matches!(result, Err(RuntimeError::InvalidMemberType { .. })));

    // The member name is checked before the assigned value's kind.
    let result = runtime.set_member(&z, "nope", &Value::Bool(true));
    assert!(matches!(result, Err(RuntimeError::MissingMember { .. })));
}

#[test]
fn vector_construction_and_indexing() {
    let runtime = Runtime::new();
    let vector = runtime.new_vector(Kind::Real, 3).unwrap();
    assert_eq!(vector.len(), 3);
    assert_eq!(vector.elem_kind(), Kind::Real);
    let value = Value::Vector(vector);

    let index = |i: i64| vec![discrete(&runtime, i)];

    assert_eq!(runtime.get_index(&value, &index(0)).unwrap(), real(&runtime, 0.0));
    runtime.set_index(&value, &index(1), &real(&runtime, 4.5)).unwrap();
    assert_eq!(runtime.get_index(&value, &index(1)).unwrap(), real(&runtime, 4.5));

    // An integral real works as an index too.
    assert_eq!(runtime.get_index(&value, &[real(&runtime, 1.0)]).unwrap(),
               real(&runtime, 4.5));

    // Out-of-range reads yield none; writes are errors.
    assert_eq!(runtime.get_index(&value, &index(9)).unwrap(), Value::None);
    assert!(matches!(runtime.set_index(&value, &index(9), &real(&runtime, 1.0)),
                     Err(RuntimeError::InvalidIndex { .. })));

    assert!(matches!(runtime.get_index(&value, &index(-1)),
                     Err(RuntimeError::InvalidIndex { .. })));
    assert!(matches!(runtime.get_index(&value, &[real(&runtime, 0.5)]),
                     Err(RuntimeError::InvalidIndex { .. })));
    assert!(matches!(runtime.get_index(&value, &[]), Err(RuntimeError::InvalidIndex { .. })));

    // Elements keep the vector homogeneous.
    assert!(matches!(runtime.set_index(&value, &index(0), &discrete(&runtime, 1)),
                     Err(RuntimeError::InvalidMemberType { .. })));

    // Indexing a scalar is not supported.
    assert!(matches!(runtime.get_index(&real(&runtime, 1.0), &index(0)),
                     Err(RuntimeError::InvalidIndex { .. })));
}

#[test]
fn vector_members_grow_on_named_writes() {
    let runtime = Runtime::new();
    let value = Value::Vector(runtime.new_vector(Kind::Real, 2).unwrap());

    runtime.set_member(&value, "y", &real(&runtime, 2.0)).unwrap();
    assert_eq!(runtime.get_member(&value, "y").unwrap(), real(&runtime, 2.0));

    // Writing past the end produces a longer vector; the original is kept.
    let grown = runtime.set_member(&value, "w", &real(&runtime, 4.0)).unwrap();
    let Value::Vector(vector) = &grown else {
        panic!("Expected a vector, got {grown}");
    };
    assert_eq!(vector.len(), 4);
    assert_eq!(vector.get(1), real(&runtime, 2.0));
    assert_eq!(vector.get(3), real(&runtime, 4.0));
    if let Value::Vector(original) = &value {
        assert_eq!(original.len(), 2);
    }

    // Reading past the end through a member yields none.
    assert_eq!(runtime.get_member(&value, "w").unwrap(), Value::None);
}

#[test]
fn unregistered_vector_kinds_are_a_configuration_error() {
    let runtime = Runtime::new();
    let result = runtime.new_vector(Kind::Complex, 2);
    assert_eq!(result,
               Err(RuntimeError::UnconfiguredVectorKind { kind: "complex" }));
}

#[test]
fn released_vector_storage_is_reused() {
    let runtime = Runtime::new();

    let vector = runtime.new_vector(Kind::Real, 4).unwrap();
    runtime.release_vector(&vector);
    assert_eq!(vector.len(), 0);
    assert_eq!(runtime.pool().borrow().len(), 1);

    let again = runtime.new_vector(Kind::Real, 4).unwrap();
    assert_eq!(again.len(), 4);
    assert!(runtime.pool().borrow().is_empty());
}

#[test]
fn pool_reuses_exact_length_arrays() {
    let mut pool: ArrayPool<i32> = ArrayPool::new();

    let mut array = pool.get(4);
    array[0] = 7;
    let ptr = array.as_ptr();
    pool.release(array);

    // Same length comes back on the same allocation, zeroed.
    let reused = pool.get(4);
    assert_eq!(reused.as_ptr(), ptr);
    assert_eq!(reused, vec![0; 4]);

    // A different length allocates fresh.
    pool.release(reused);
    let other = pool.get(5);
    assert_ne!(other.as_ptr(), ptr);
    assert_eq!(pool.len(), 1);
}

#[test]
fn pool_respects_its_bounds() {
    let mut pool: ArrayPool<i32> = ArrayPool::with_bounds(2, 8);

    pool.release(vec![0; 4]);
    pool.release(vec![0; 4]);
    // At capacity, further arrays are dropped.
    pool.release(vec![0; 4]);
    assert_eq!(pool.len(), 2);

    // Oversized and empty arrays are never pooled.
    let mut pool: ArrayPool<i32> = ArrayPool::with_bounds(2, 8);
    pool.release(vec![0; 9]);
    pool.release(Vec::new());
    assert!(pool.is_empty());

    // Zero-length requests never touch the pool.
    pool.release(vec![0; 4]);
    assert_eq!(pool.get(0), Vec::<i32>::new());
    assert_eq!(pool.len(), 1);
}

#[test]
fn program_state_tracks_mutability() {
    let mut state = ProgramState::new();
    assert!(state.is_empty());

    let runtime = Runtime::new();
    state.declare("x", Variable::new(discrete(&runtime, 1), Mutability::Mutable));
    state.declare("c", Variable::new(real(&runtime, 2.5), Mutability::Constant));

    assert_eq!(state.len(), 2);
    assert!(state.contains("x"));
    assert!(!state.contains("y"));
    assert!(state.get("x").unwrap().is_mutable());
    assert!(!state.get("c").unwrap().is_mutable());

    // Redeclaration replaces the binding.
    state.declare("x", Variable::new(discrete(&runtime, 9), Mutability::None));
    assert_eq!(state.get("x").unwrap().value, discrete(&runtime, 9));
    assert!(!state.get("x").unwrap().is_mutable());

    let variable = state.get_mut("x").unwrap();
    variable.value = Value::Bool(true);
    assert_eq!(state.get("x").unwrap().value, Value::Bool(true));
}

#[test]
fn invalid_operator_errors_name_both_operands() {
    let runtime = Runtime::new();

    let result = runtime.invoke(Operator::Add, &Value::Bool(true), Some(&discrete(&runtime, 1)), false);
    match result {
        Err(RuntimeError::InvalidOperator { op, left, right }) => {
            assert_eq!(op, Operator::Add);
            assert_eq!(left, "bool");
            assert_eq!(right, "discrete");
        },
        other => panic!("Expected an invalid operator error, got {other:?}"),
    }

    let result = runtime.invoke(Operator::Not, &discrete(&runtime, 1), None, false);
    assert!(matches!(result,
                     Err(RuntimeError::InvalidOperator { right: "none", .. })));
}

#[test]
fn display_formats() {
    let runtime = Runtime::new();

    assert_eq!(Value::None.to_string(), "none");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(discrete(&runtime, -3).to_string(), "-3");
    assert_eq!(real(&runtime, 2.5).to_string(), "2.5");
    assert_eq!(complex(0.0, 1.0).to_string(), "1i");
    assert_eq!(ComplexNumber::new(2.0, -1.0).to_string(), "2 - 1i");
    assert_eq!(Value::Vector(runtime.new_vector(Kind::Real, 2).unwrap()).to_string(), "[0, 0]");
}
