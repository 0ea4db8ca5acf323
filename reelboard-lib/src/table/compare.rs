//! Total ordering over record values.

use std::cmp::Ordering;

use super::state::SortOrder;
use crate::model::Value;

/// Where null (or missing) values go in a sorted column.
///
/// The placement does not flip with the sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullsOrder {
    First,
    #[default]
    Last,
}

/// How strings compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    /// Code point order: `"Bob" < "Zoe" < "amy"`.
    #[default]
    Ordinal,
    /// Lowercased code point order: `"amy" < "Bob" < "Zoe"`.
    /// Strings equal under lowercasing keep their input order.
    CaseInsensitive,
}

/// Comparator used by the table's sort step.
///
/// Numbers compare numerically (integers and floats together), strings by
/// the configured [`Collation`], timestamps chronologically. Values of
/// different kinds order by kind: bool, number, timestamp, string, JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Comparator {
    pub nulls: NullsOrder,
    pub collation: Collation,
}

impl Comparator {
    pub fn new(nulls: NullsOrder, collation: Collation) -> Self {
        Self { nulls, collation }
    }

    /// Compares two values for a column sorted in `order`.
    pub fn compare(&self, a: &Value, b: &Value, order: SortOrder) -> Ordering {
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => self.null_side(),
            (false, true) => self.null_side().reverse(),
            (false, false) => {
                let ordering = self.compare_present(a, b);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
        }
    }

    fn null_side(&self) -> Ordering {
        match self.nulls {
            NullsOrder::First => Ordering::Less,
            NullsOrder::Last => Ordering::Greater,
        }
    }

    fn compare_present(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Int(x), Value::Int(y)) => x.cmp(y),
            (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
            (Value::String(x), Value::String(y)) => match self.collation {
                Collation::Ordinal => x.cmp(y),
                Collation::CaseInsensitive => x.to_lowercase().cmp(&y.to_lowercase()),
            },
            (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
            (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
            (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
            _ => match kind_rank(a).cmp(&kind_rank(b)) {
                Ordering::Equal => a.to_string().cmp(&b.to_string()),
                other => other,
            },
        }
    }
}

/// Exact comparison of an integer with a float, consistent with
/// [`f64::total_cmp`]: NaNs sit beyond the infinities and an integer zero
/// ranks with `+0.0`.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float above i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = float - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 || (float.is_sign_negative() && int == 0) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 5,
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::DateTime(_) => 2,
        Value::String(_) => 3,
        Value::Json(_) => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: Vec<Value>, comparator: Comparator, order: SortOrder) -> Vec<Value> {
        let mut values = values;
        values.sort_by(|a, b| comparator.compare(a, b, order));
        values
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let cmp = Comparator::default();
        let input = vec![Value::Null, Value::from(2i64), Value::from(1i64)];

        let asc = sorted(input.clone(), cmp, SortOrder::Asc);
        assert_eq!(asc, vec![Value::from(1i64), Value::from(2i64), Value::Null]);

        let desc = sorted(input, cmp, SortOrder::Desc);
        assert_eq!(desc, vec![Value::from(2i64), Value::from(1i64), Value::Null]);
    }

    #[test]
    fn test_nulls_first_policy() {
        let cmp = Comparator::new(NullsOrder::First, Collation::Ordinal);
        let out = sorted(vec![Value::from("b"), Value::Null], cmp, SortOrder::Asc);
        assert_eq!(out, vec![Value::Null, Value::from("b")]);
    }

    #[test]
    fn test_mixed_numbers_compare_numerically() {
        let cmp = Comparator::default();
        let out = sorted(
            vec![Value::from(10i64), Value::from(2.5), Value::from(3i64)],
            cmp,
            SortOrder::Asc,
        );
        assert_eq!(out, vec![Value::from(2.5), Value::from(3i64), Value::from(10i64)]);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let cmp = Comparator::default();
        let big = Value::from(9_007_199_254_740_993i64);
        let rounded = Value::from(9_007_199_254_740_992.0);
        let below = Value::from(9_007_199_254_740_992i64);

        assert_eq!(cmp.compare(&big, &rounded, SortOrder::Asc), Ordering::Greater);
        assert_eq!(cmp.compare(&rounded, &big, SortOrder::Asc), Ordering::Less);
        assert_eq!(cmp.compare(&below, &rounded, SortOrder::Asc), Ordering::Equal);

        assert_eq!(
            cmp.compare(&Value::from(i64::MAX), &Value::from(9_223_372_036_854_775_808.0), SortOrder::Asc),
            Ordering::Less
        );
        assert_eq!(
            cmp.compare(&Value::from(i64::MIN), &Value::from(-9_223_372_036_854_775_808.0), SortOrder::Asc),
            Ordering::Equal
        );
    }

    #[test]
    fn test_int_float_edges() {
        let cmp = Comparator::default();
        let compare = |a: Value, b: Value| cmp.compare(&a, &b, SortOrder::Asc);

        assert_eq!(compare(Value::from(2i64), Value::from(2.5)), Ordering::Less);
        assert_eq!(compare(Value::from(-2i64), Value::from(-2.5)), Ordering::Greater);
        assert_eq!(compare(Value::from(0i64), Value::from(-0.0)), Ordering::Greater);
        assert_eq!(compare(Value::from(0i64), Value::from(0.0)), Ordering::Equal);
        assert_eq!(compare(Value::from(i64::MAX), Value::from(f64::NAN)), Ordering::Less);
        assert_eq!(compare(Value::from(i64::MIN), Value::from(f64::NEG_INFINITY)), Ordering::Greater);
    }

    #[test]
    fn test_collations() {
        let names = vec![Value::from("Zoe"), Value::from("amy"), Value::from("Bob")];

        let ordinal = sorted(names.clone(), Comparator::default(), SortOrder::Asc);
        assert_eq!(ordinal, vec![Value::from("Bob"), Value::from("Zoe"), Value::from("amy")]);

        let folded = sorted(
            names,
            Comparator::new(NullsOrder::Last, Collation::CaseInsensitive),
            SortOrder::Asc,
        );
        assert_eq!(folded, vec![Value::from("amy"), Value::from("Bob"), Value::from("Zoe")]);
    }

    #[test]
    fn test_kind_rank_between_types() {
        let cmp = Comparator::default();
        assert_eq!(
            cmp.compare(&Value::from(5i64), &Value::from("5"), SortOrder::Asc),
            Ordering::Less
        );
        assert_eq!(
            cmp.compare(&Value::from(true), &Value::from(0i64), SortOrder::Asc),
            Ordering::Less
        );
    }
}
