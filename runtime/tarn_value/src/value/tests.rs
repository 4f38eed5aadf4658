use pretty_assertions::assert_eq;

use super::*;
use crate::Numeric;

#[test]
fn constants_are_canonical() {
    assert_eq!(Value::NULL, Value::Null);
    assert_eq!(Value::TRUE, Value::Bool(true));
    assert_eq!(Value::FALSE, Value::Bool(false));
    for (i, v) in Value::SMALL_INTS.iter().enumerate() {
        assert_eq!(*v, Value::Int(i as i64));
    }
    assert_eq!(Value::DOUBLE_0, Value::Double(0.0));
    assert_eq!(Value::DOUBLE_1, Value::Double(1.0));
    // Every path producing a boolean lands on the same constants.
    assert_eq!(Value::bool_of(true), Value::TRUE);
    assert_eq!(Value::NULL.assign(&Value::TRUE), Value::TRUE);
}

#[test]
fn kinds() {
    assert_eq!(Value::NULL.kind(), Kind::Null);
    assert_eq!(Value::TRUE.kind(), Kind::Bool);
    assert_eq!(Value::Int(1).kind(), Kind::Int);
    assert_eq!(Value::Double(1.0).kind(), Kind::Double);
    assert_eq!(Value::string("").kind(), Kind::Str);
    assert_eq!(Value::array().kind(), Kind::Array);
    assert_eq!(Value::reference(Value::NULL).kind(), Kind::Ref);
    assert_eq!(Value::array().index_scalar(0_i64).kind(), Kind::Ref);
    assert_eq!(Value::Int(1).type_name(), "int");
}

#[test]
fn truthiness() {
    for falsy in [
        Value::NULL,
        Value::FALSE,
        Value::INT_0,
        Value::DOUBLE_0,
        Value::string(""),
        Value::string("0"),
        Value::array(),
    ] {
        assert!(!falsy.to_bool(), "{falsy:?}");
    }
    for truthy in [
        Value::TRUE,
        Value::Int(-1),
        Value::Double(0.1),
        Value::string("0.0"),
        Value::string("a"),
    ] {
        assert!(truthy.to_bool(), "{truthy:?}");
    }
    let arr = Value::array();
    arr.index_scalar(0_i64).assign(&Value::NULL);
    assert!(arr.to_bool());
}

#[test]
fn numeric_coercion() {
    assert_eq!(Value::string("10").to_numeric(), Numeric::Int(10));
    assert_eq!(Value::string("10.5abc").to_numeric(), Numeric::Double(10.5));
    assert_eq!(Value::string("abc").to_numeric(), Numeric::Int(0));
    assert_eq!(Value::TRUE.to_numeric(), Numeric::Int(1));
    assert_eq!(Value::NULL.to_numeric(), Numeric::Int(0));
    assert_eq!(Value::Double(5.9).to_long(), 5);
    assert_eq!(Value::Int(5).to_double(), 5.0);
    let r = Value::reference(Value::string("  -42"));
    assert_eq!(r.to_long(), -42);
}

#[test]
fn canonical_text() {
    assert_eq!(Value::TRUE.to_text(), "1");
    assert_eq!(Value::FALSE.to_text(), "");
    assert_eq!(Value::NULL.to_text(), "");
    assert_eq!(Value::Int(-3).to_text(), "-3");
    assert_eq!(Value::Double(10.5).to_text(), "10.5");
    assert_eq!(Value::Double(100.0).to_text(), "100");
    assert_eq!(Value::string("x").to_text(), "x");
    assert_eq!(Value::array().to_text(), "Array");
    // Display agrees with to_text.
    assert_eq!(format!("{}", Value::TRUE), "1");
    assert_eq!(format!("{}", Value::Double(2.5)), "2.5");
}

#[test]
fn string_clones_share_the_allocation() {
    let a = Value::string("hello");
    let b = a.clone();
    match (&a, &b) {
        (Value::Str(x), Value::Str(y)) => assert!(Heap::shares_allocation(x, y)),
        _ => unreachable!(),
    }
}

#[test]
fn structural_identity_for_handles() {
    let a = Value::array();
    let b = Value::array();
    // Identity, not content: two distinct empty containers differ here
    // (loose equality is `Value::equal`).
    assert_ne!(a, b);
    assert_eq!(a, a.clone());

    let r = Value::reference(Value::Int(1));
    assert_eq!(r, r.clone());
    assert_ne!(r, Value::reference(Value::Int(1)));
}

#[test]
fn from_impls() {
    assert_eq!(Value::from(true), Value::TRUE);
    assert_eq!(Value::from(3_i64), Value::Int(3));
    assert_eq!(Value::from(2.5), Value::Double(2.5));
    assert_eq!(Value::from("s"), Value::string("s"));
}
