//! Field reducers.
//!
//! Each reducer turns a field's values into one scalar. Null and `NaN`
//! values are skipped, except by `first` and `last`, which report the raw
//! value at either end. Aggregations over no usable values yield null;
//! `sum` and `count` yield 0.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use frame_model::{FieldType, Value};

/// Reducer ids as they appear in `calcs` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReducerId {
    First,
    Last,
    FirstNotNull,
    LastNotNull,
    Min,
    Max,
    Mean,
    Sum,
    Count,
    Range,
    Delta,
    Diff,
    Step,
    ChangeCount,
    DistinctCount,
    AllIsNull,
    AllIsZero,
}

impl ReducerId {
    pub const ALL: [ReducerId; 17] = [
        ReducerId::First,
        ReducerId::Last,
        ReducerId::FirstNotNull,
        ReducerId::LastNotNull,
        ReducerId::Min,
        ReducerId::Max,
        ReducerId::Mean,
        ReducerId::Sum,
        ReducerId::Count,
        ReducerId::Range,
        ReducerId::Delta,
        ReducerId::Diff,
        ReducerId::Step,
        ReducerId::ChangeCount,
        ReducerId::DistinctCount,
        ReducerId::AllIsNull,
        ReducerId::AllIsZero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReducerId::First => "first",
            ReducerId::Last => "last",
            ReducerId::FirstNotNull => "firstNotNull",
            ReducerId::LastNotNull => "lastNotNull",
            ReducerId::Min => "min",
            ReducerId::Max => "max",
            ReducerId::Mean => "mean",
            ReducerId::Sum => "sum",
            ReducerId::Count => "count",
            ReducerId::Range => "range",
            ReducerId::Delta => "delta",
            ReducerId::Diff => "diff",
            ReducerId::Step => "step",
            ReducerId::ChangeCount => "changeCount",
            ReducerId::DistinctCount => "distinctCount",
            ReducerId::AllIsNull => "allIsNull",
            ReducerId::AllIsZero => "allIsZero",
        }
    }

    /// Label used in derived field names.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReducerId::First => "First",
            ReducerId::Last => "Last",
            ReducerId::FirstNotNull => "First *",
            ReducerId::LastNotNull => "Last *",
            ReducerId::Min => "Min",
            ReducerId::Max => "Max",
            ReducerId::Mean => "Mean",
            ReducerId::Sum => "Total",
            ReducerId::Count => "Count",
            ReducerId::Range => "Range",
            ReducerId::Delta => "Delta",
            ReducerId::Diff => "Difference",
            ReducerId::Step => "Step",
            ReducerId::ChangeCount => "Change count",
            ReducerId::DistinctCount => "Distinct count",
            ReducerId::AllIsNull => "All null",
            ReducerId::AllIsZero => "All zeros",
        }
    }

    /// Type of the field a reducer produces.
    pub fn output_type(&self) -> FieldType {
        match self {
            ReducerId::AllIsNull | ReducerId::AllIsZero => FieldType::Boolean,
            _ => FieldType::Number,
        }
    }

    /// Reduce a field's values.
    pub fn reduce(&self, values: &[Value]) -> Value {
        match self {
            ReducerId::First => values.first().cloned().unwrap_or_default(),
            ReducerId::Last => values.last().cloned().unwrap_or_default(),
            ReducerId::FirstNotNull => numbers(values).next().map_or(Value::Null, Value::Number),
            ReducerId::LastNotNull => numbers(values)
                .next_back()
                .map_or(Value::Null, Value::Number),
            ReducerId::Min => numbers(values).reduce(f64::min).into(),
            ReducerId::Max => numbers(values).reduce(f64::max).into(),
            ReducerId::Mean => {
                let (sum, count) = numbers(values).fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
                (count > 0).then(|| sum / count as f64).into()
            }
            ReducerId::Sum => Value::Number(numbers(values).sum()),
            ReducerId::Count => Value::Number(numbers(values).count() as f64),
            ReducerId::Range => {
                let min = numbers(values).reduce(f64::min);
                let max = numbers(values).reduce(f64::max);
                min.zip(max).map(|(min, max)| max - min).into()
            }
            ReducerId::Delta => delta(values).into(),
            ReducerId::Diff => {
                let first = numbers(values).next();
                let last = numbers(values).next_back();
                first.zip(last).map(|(first, last)| last - first).into()
            }
            ReducerId::Step => step(values).into(),
            ReducerId::ChangeCount => Value::Number(change_count(values) as f64),
            ReducerId::DistinctCount => {
                let distinct: HashSet<u64> = numbers(values).map(normalized_bits).collect();
                Value::Number(distinct.len() as f64)
            }
            ReducerId::AllIsNull => Value::Bool(values.iter().all(Value::is_null_or_nan)),
            ReducerId::AllIsZero => {
                let mut seen = false;
                let all_zero = numbers(values).all(|v| {
                    seen = true;
                    v == 0.0
                });
                Value::Bool(seen && all_zero)
            }
        }
    }
}

impl fmt::Display for ReducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReducerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReducerId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown reducer: {s}"))
    }
}

/// Usable numbers of a field, skipping null and `NaN`.
fn numbers(values: &[Value]) -> impl DoubleEndedIterator<Item = f64> + '_ {
    values
        .iter()
        .filter(|value| !matches!(value, Value::Bool(_)))
        .map(Value::coerce_numeric)
        .filter(|v| !v.is_nan())
}

/// Sum of increases; a drop counts as a counter reset.
fn delta(values: &[Value]) -> Option<f64> {
    let mut iter = numbers(values);
    let mut previous = iter.next()?;
    let mut total = 0.0;
    for current in iter {
        if current >= previous {
            total += current - previous;
        } else {
            total += current;
        }
        previous = current;
    }
    Some(total)
}

/// Smallest gap between consecutive values.
fn step(values: &[Value]) -> Option<f64> {
    let collected: Vec<f64> = numbers(values).collect();
    collected
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .reduce(f64::min)
}

fn change_count(values: &[Value]) -> usize {
    let collected: Vec<f64> = numbers(values).collect();
    collected.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

fn normalized_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn min_max_skip_nan() {
        let values = nums(&[1.0, f64::NAN, 3.0]);
        assert_eq!(ReducerId::Min.reduce(&values), Value::Number(1.0));
        assert_eq!(ReducerId::Max.reduce(&values), Value::Number(3.0));
        assert_eq!(ReducerId::Mean.reduce(&values), Value::Number(2.0));
        assert_eq!(ReducerId::Count.reduce(&values), Value::Number(2.0));
    }

    #[test]
    fn first_and_last_report_raw_values() {
        let values = vec![Value::Number(f64::NAN), Value::Number(2.0), Value::Null];
        assert!(matches!(ReducerId::First.reduce(&values), Value::Number(n) if n.is_nan()));
        assert_eq!(ReducerId::Last.reduce(&values), Value::Null);
        assert_eq!(ReducerId::FirstNotNull.reduce(&values), Value::Number(2.0));
        assert_eq!(ReducerId::LastNotNull.reduce(&values), Value::Number(2.0));
    }

    #[test]
    fn delta_handles_counter_resets() {
        let values = nums(&[10.0, 15.0, 3.0, 5.0]);
        // 5 up, reset to 3, 2 up
        assert_eq!(ReducerId::Delta.reduce(&values), Value::Number(10.0));
        assert_eq!(ReducerId::Diff.reduce(&values), Value::Number(-5.0));
        assert_eq!(ReducerId::Range.reduce(&values), Value::Number(12.0));
    }

    #[test]
    fn change_and_distinct_counts() {
        let values = nums(&[1.0, 1.0, 2.0, 2.0, 1.0]);
        assert_eq!(ReducerId::ChangeCount.reduce(&values), Value::Number(2.0));
        assert_eq!(ReducerId::DistinctCount.reduce(&values), Value::Number(2.0));
        assert_eq!(ReducerId::Step.reduce(&values), Value::Number(-1.0));
    }

    #[test]
    fn empty_aggregations() {
        let values = vec![Value::Null, Value::Number(f64::NAN)];
        assert_eq!(ReducerId::Min.reduce(&values), Value::Null);
        assert_eq!(ReducerId::Mean.reduce(&values), Value::Null);
        assert_eq!(ReducerId::Sum.reduce(&values), Value::Number(0.0));
        assert_eq!(ReducerId::AllIsNull.reduce(&values), Value::Bool(true));
        assert_eq!(ReducerId::AllIsZero.reduce(&values), Value::Bool(false));
        assert_eq!(ReducerId::First.reduce(&[]), Value::Null);
    }

    #[test]
    fn all_is_zero() {
        assert_eq!(
            ReducerId::AllIsZero.reduce(&nums(&[0.0, 0.0])),
            Value::Bool(true)
        );
        assert_eq!(
            ReducerId::AllIsZero.reduce(&nums(&[0.0, 1.0])),
            Value::Bool(false)
        );
    }

    #[test]
    fn ids_round_trip_through_strings() {
        for id in ReducerId::ALL {
            assert_eq!(id.as_str().parse::<ReducerId>(), Ok(id));
            let json = serde_json::to_value(id).unwrap();
            assert_eq!(json, serde_json::Value::String(id.as_str().to_string()));
        }
        assert!("median".parse::<ReducerId>().is_err());
    }
}
