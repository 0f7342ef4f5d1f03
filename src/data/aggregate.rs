use super::error::AggregateError;
use super::filter::ValidityMask;
use super::model::{CarResult, Motion, Table};

/// Aggregate one car's file pair.
///
/// Rows are selected by the validity mask of `actual` and the same row
/// indices are used for `expected`. Both tables must have the same number of
/// rows.
pub fn aggregate(actual: &Table, expected: &Table) -> Result<CarResult, AggregateError> {
    let mask = ValidityMask::from_table(actual);

    // Alignment is checked against the expected table first so a length
    // mismatch is reported before anything is summed.
    let expected_rows = mask.select(expected)?;
    let actual_rows = mask.select(actual)?;

    Ok(CarResult {
        expected: motion(&expected_rows),
        actual: motion(&actual_rows),
        valid_rows: mask.kept(),
        total_rows: mask.len(),
    })
}

/// Sum the Cartesian projections and path length of `(angle°, time, speed)`
/// samples, each rounded to 2 decimals.
pub fn motion(rows: &[(f64, f64, f64)]) -> Motion {
    let mut horizontal = 0.0;
    let mut vertical = 0.0;
    let mut distance = 0.0;

    for &(angle, time, speed) in rows {
        let step = time * speed;
        let (sin, cos) = angle.to_radians().sin_cos();
        horizontal += step * cos;
        vertical += step * sin;
        distance += step;
    }

    Motion {
        horizontal: round2(horizontal),
        vertical: round2(vertical),
        distance: round2(distance),
    }
}

/// Round to 2 decimal places; `-0.0` comes back as `0.0`.
///
/// Rounds the exact binary value, so `2.855` (stored just below) gives
/// `2.85` and the exact tie `0.125` rounds to even.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse::<f64>().unwrap_or(value) + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Reading;

    fn table(rows: &[(f64, f64, f64)]) -> Table {
        Table::from_rows(rows.iter().map(|&(a, t, s)| Reading::new(a, t, s)).collect())
    }

    fn na_angle(time: f64, speed: f64) -> Reading {
        Reading {
            angle: None,
            time: Some(time),
            speed: Some(speed),
        }
    }

    #[test]
    fn right_angle_pair() {
        let rows = [(0.0, 10.0, 5.0), (90.0, 10.0, 5.0)];
        let car = aggregate(&table(&rows), &table(&rows)).unwrap();

        let expected = Motion {
            horizontal: 50.0,
            vertical: 50.0,
            distance: 100.0,
        };
        assert_eq!(car.expected, expected);
        assert_eq!(car.actual, expected);
        assert_eq!(car.valid_rows, 2);
        assert_eq!(car.total_rows, 2);
    }

    #[test]
    fn sentinel_in_actual_drops_row_from_both_files() {
        let actual = Table::from_rows(vec![na_angle(10.0, 5.0), Reading::new(90.0, 10.0, 5.0)]);
        let expected = table(&[(0.0, 10.0, 5.0), (90.0, 10.0, 5.0)]);

        let car = aggregate(&actual, &expected).unwrap();
        assert_eq!(car.expected, car.actual);
        assert_eq!(car.expected.horizontal, 0.0);
        assert_eq!(car.expected.vertical, 50.0);
        assert_eq!(car.expected.distance, 50.0);
        assert_eq!(car.valid_rows, 1);
    }

    #[test]
    fn no_valid_rows_sums_to_zero() {
        let actual = Table::from_rows(vec![na_angle(10.0, 5.0), na_angle(3.0, 4.0)]);
        let expected = table(&[(30.0, 10.0, 5.0), (60.0, 3.0, 4.0)]);

        let car = aggregate(&actual, &expected).unwrap();
        assert_eq!(car.into_tuple(), (0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
        assert!(car.expected.horizontal.is_sign_positive());
    }

    #[test]
    fn empty_tables_sum_to_zero() {
        let car = aggregate(&Table::default(), &Table::default()).unwrap();
        assert_eq!(car.actual, Motion::default());
        assert_eq!(car.expected, Motion::default());
    }

    #[test]
    fn zero_time_or_speed_contributes_nothing() {
        let base = motion(&[(37.0, 12.5, 3.2)]);
        let padded = motion(&[(37.0, 12.5, 3.2), (123.0, 0.0, 9.0), (-80.0, 7.0, 0.0)]);
        assert_eq!(base, padded);
    }

    #[test]
    fn displacement_sign_follows_angle() {
        let m = motion(&[(180.0, 2.0, 3.0), (270.0, 1.0, 4.0)]);
        assert_eq!(m.horizontal, -6.0);
        assert_eq!(m.vertical, -4.0);
        assert_eq!(m.distance, 10.0);

        // Angles beyond one turn wrap around.
        assert_eq!(motion(&[(-360.0, 1.0, 1.0)]), motion(&[(0.0, 1.0, 1.0)]));
    }

    #[test]
    fn outputs_are_rounded_to_two_decimals() {
        let m = motion(&[(45.0, 1.0, 1.0)]);
        assert_eq!(m.horizontal, 0.71);
        assert_eq!(m.vertical, 0.71);
        assert_eq!(m.distance, 1.0);

        let m = motion(&[(0.0, 1.0 / 3.0, 1.0), (0.0, 1.0 / 3.0, 1.0)]);
        assert_eq!(m.distance, 0.67);
    }

    #[test]
    fn round2_normalises_negative_zero() {
        assert!(round2(-0.001).is_sign_positive());
        assert_eq!(round2(-1.234), -1.23);
        assert_eq!(round2(2.005_1), 2.01);
    }

    #[test]
    fn round2_rounds_the_stored_value_once() {
        assert_eq!(round2(2.855), 2.85);
        assert_eq!(round2(0.125), 0.12);

        // Same through aggregation: t*s lands on these values exactly.
        assert_eq!(motion(&[(0.0, 2.855, 1.0)]).distance, 2.85);
        assert_eq!(motion(&[(0.0, 0.5, 0.25)]).distance, 0.12);
    }

    #[test]
    fn aggregate_is_repeatable() {
        let actual = table(&[(12.0, 3.0, 4.0), (200.0, 5.5, 1.5)]);
        let expected = table(&[(10.0, 3.0, 4.0), (190.0, 5.0, 1.5)]);
        let first = aggregate(&actual, &expected).unwrap();
        let second = aggregate(&actual, &expected).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unequal_row_counts_are_rejected() {
        let actual = table(&[(0.0, 1.0, 1.0)]);
        let expected = table(&[(0.0, 1.0, 1.0), (0.0, 1.0, 1.0)]);
        assert_eq!(
            aggregate(&actual, &expected),
            Err(AggregateError::Alignment {
                expected_rows: 2,
                actual_rows: 1
            })
        );
    }
}
