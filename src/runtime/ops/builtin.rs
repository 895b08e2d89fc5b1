use crate::{
    error::RuntimeError,
    runtime::{
        ops::core::{OpContext, OpResult, Operator, OperatorRegistry},
        value::{
            complex::ComplexNumber,
            core::{Kind, Value},
            number::{Discrete, Real},
        },
    },
};

/// The numeric kinds that participate in cross-kind promotion.
const NUMERIC_KINDS: [Kind; 3] = [Kind::Discrete, Kind::Real, Kind::Complex];

/// Operators with a numeric binary or comparison meaning.
const NUMERIC_OPS: [Operator; 13] = [Operator::Add,
                                     Operator::Subtract,
                                     Operator::Multiply,
                                     Operator::Divide,
                                     Operator::Power,
                                     Operator::In,
                                     Operator::Equal,
                                     Operator::Greater,
                                     Operator::Less,
                                     Operator::NotIn,
                                     Operator::NotEqual,
                                     Operator::GreaterEqual,
                                     Operator::LessEqual];

/// Operators with a boolean binary meaning; arithmetic operators are
/// redefined as logical ones on booleans.
const BOOL_OPS: [Operator; 13] = [Operator::Add,
                                  Operator::Multiply,
                                  Operator::Power,
                                  Operator::Union,
                                  Operator::Intersect,
                                  Operator::In,
                                  Operator::Equal,
                                  Operator::Greater,
                                  Operator::Less,
                                  Operator::NotIn,
                                  Operator::NotEqual,
                                  Operator::GreaterEqual,
                                  Operator::LessEqual];

/// Unary operators defined on numeric kinds.
const NUMERIC_UNARY_OPS: [Operator; 4] =
    [Operator::Negate, Operator::Magnitude, Operator::Substitute, Operator::Evaluate];

/// Unary operators defined on booleans.
const BOOL_UNARY_OPS: [Operator; 4] =
    [Operator::Not, Operator::Magnitude, Operator::Substitute, Operator::Evaluate];

/// Equality-family operators, the only ones defined on the none sentinel.
const NONE_OPS: [Operator; 4] =
    [Operator::Equal, Operator::NotEqual, Operator::In, Operator::NotIn];

/// Registers every built-in operation on the registry, exactly one
/// registration per valid `(operator, kind, kind)` triple.
///
/// Cross-kind numeric pairs are registered explicitly; there is no
/// inheritance-style fallback in the registry, so a pair that is not listed
/// here simply fails to resolve.
pub fn register_defaults(registry: &mut OperatorRegistry) {
    for op in NONE_OPS {
        registry.register(op, Kind::None, Kind::None, none_op);
    }
    for op in BOOL_OPS {
        registry.register(op, Kind::Bool, Kind::Bool, bool_op);
    }
    for op in BOOL_UNARY_OPS {
        registry.register(op, Kind::Bool, Kind::None, bool_unary);
    }
    for op in NUMERIC_OPS {
        for left in NUMERIC_KINDS {
            for right in NUMERIC_KINDS {
                registry.register(op, left, right, numeric_op);
            }
        }
    }
    for op in NUMERIC_UNARY_OPS {
        for kind in NUMERIC_KINDS {
            registry.register(op, kind, Kind::None, numeric_unary);
        }
    }
}

fn invalid(op: Operator, left: &Value, right: Option<&Value>) -> RuntimeError {
    RuntimeError::InvalidOperator { op,
                                    left:  left.type_name(),
                                    right: right.map_or(Kind::None.type_name(),
                                                        Value::type_name), }
}

/// Equality on the none sentinel: `none` is equal only to itself, so the
/// answer is fixed once both operands are known to be `none`.
fn none_op(_ctx: &OpContext<'_>,
           op: Operator,
           left: &Value,
           right: Option<&Value>,
           _assign: bool)
           -> OpResult<Value> {
    match op {
        Operator::Equal | Operator::In => Ok(Value::Bool(true)),
        Operator::NotEqual | Operator::NotIn => Ok(Value::Bool(false)),
        _ => Err(invalid(op, left, right)),
    }
}

/// The boolean operator table. Operations always return one of the two
/// canonical boolean values; booleans are never mutated in place.
fn bool_op(_ctx: &OpContext<'_>,
           op: Operator,
           left: &Value,
           right: Option<&Value>,
           _assign: bool)
           -> OpResult<Value> {
    let (Value::Bool(a), Some(Value::Bool(b))) = (left, right) else {
        unreachable!()
    };
    let result = match op {
        Operator::Add | Operator::Union => a | b,
        Operator::Multiply | Operator::Intersect => a & b,
        Operator::Power => a ^ b,
        Operator::In | Operator::Equal => a == b,
        Operator::NotIn | Operator::NotEqual => a != b,
        // Implication-style orderings with false < true.
        Operator::Greater => *a && !b,
        Operator::GreaterEqual => *a || !b,
        Operator::Less => !a && *b,
        Operator::LessEqual => !a || *b,
        _ => return Err(invalid(op, left, right)),
    };
    Ok(Value::Bool(result))
}

fn bool_unary(_ctx: &OpContext<'_>,
              op: Operator,
              left: &Value,
              right: Option<&Value>,
              _assign: bool)
              -> OpResult<Value> {
    let Value::Bool(a) = left else { unreachable!() };
    match op {
        Operator::Not => Ok(Value::Bool(!a)),
        Operator::Magnitude | Operator::Substitute | Operator::Evaluate => Ok(left.clone()),
        _ => Err(invalid(op, left, right)),
    }
}

/// The shared implementation behind every numeric kind pair.
///
/// Promotes both operands to the higher tower level, runs the pure
/// operation or comparison table at that level, then routes the result
/// through the cache (which demotes complex results with zero imaginary
/// part) or through in-place assignment when the flag allows it.
fn numeric_op(ctx: &OpContext<'_>,
              op: Operator,
              left: &Value,
              right: Option<&Value>,
              assign: bool)
              -> OpResult<Value> {
    let Some(right) = right else { unreachable!() };
    let joint = left.kind()
                    .tower_level()
                    .max(right.kind().tower_level());

    match joint {
        Some(1) => {
            let (Some(a), Some(b)) = (left.as_discrete(), right.as_discrete()) else {
                unreachable!()
            };
            if let Some(result) = Discrete::binary(op, a, b)? {
                if assign && let Value::Discrete(handle) = left {
                    return Ok(Value::Discrete(handle.set_value(result, ctx.cache)));
                }
                return Ok(Value::Discrete(ctx.cache.discrete(result)));
            }
            Discrete::test(op, a, b)
                .map(Value::Bool)
                .ok_or_else(|| invalid(op, left, Some(right)))
        },
        Some(2) => {
            let (Some(a), Some(b)) = (left.as_real(), right.as_real()) else {
                unreachable!()
            };
            if let Some(result) = Real::binary(op, a, b) {
                if assign && let Value::Real(handle) = left {
                    return Ok(Value::Real(handle.set_value(result, ctx.cache)));
                }
                return Ok(Value::Real(ctx.cache.real(result)));
            }
            Real::test(op, a, b)
                .map(Value::Bool)
                .ok_or_else(|| invalid(op, left, Some(right)))
        },
        Some(3) => {
            let (Some(a), Some(b)) = (left.as_complex(), right.as_complex()) else {
                unreachable!()
            };
            if let Some(result) = ComplexNumber::binary(op, a, b) {
                if assign && let Value::Complex(handle) = left {
                    return Ok(handle.set_value(result, ctx.cache));
                }
                return Ok(ctx.cache.complex(result));
            }
            ComplexNumber::test(op, a, b)
                .map(Value::Bool)
                .ok_or_else(|| invalid(op, left, Some(right)))
        },
        _ => unreachable!(),
    }
}

/// The shared implementation behind the numeric unary operators.
///
/// `Substitute` and `Evaluate` return the operand itself (same identity);
/// a leaf value has no free variables to substitute.
fn numeric_unary(ctx: &OpContext<'_>,
                 op: Operator,
                 left: &Value,
                 right: Option<&Value>,
                 assign: bool)
                 -> OpResult<Value> {
    if matches!(op, Operator::Substitute | Operator::Evaluate) {
        return Ok(left.clone());
    }

    match left {
        Value::Discrete(handle) => {
            let Some(result) = Discrete::unary(op, handle.value()) else {
                return Err(invalid(op, left, right));
            };
            if assign {
                return Ok(Value::Discrete(handle.set_value(result, ctx.cache)));
            }
            Ok(Value::Discrete(ctx.cache.discrete(result)))
        },
        Value::Real(handle) => {
            let Some(result) = Real::unary(op, handle.value()) else {
                return Err(invalid(op, left, right));
            };
            if assign {
                return Ok(Value::Real(handle.set_value(result, ctx.cache)));
            }
            Ok(Value::Real(ctx.cache.real(result)))
        },
        Value::Complex(handle) => match op {
            Operator::Negate => {
                let result = -handle.value();
                if assign {
                    return Ok(handle.set_value(result, ctx.cache));
                }
                Ok(ctx.cache.complex(result))
            },
            Operator::Magnitude => Ok(Value::Real(ctx.cache.real(handle.magnitude()))),
            _ => Err(invalid(op, left, right)),
        },
        _ => unreachable!(),
    }
}
