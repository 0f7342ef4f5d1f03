use super::error::AggregateError;
use super::model::{Reading, Table};

// ---------------------------------------------------------------------------
// Validity mask: which rows of a car's file pair take part in aggregation
// ---------------------------------------------------------------------------

/// One flag per row; `true` keeps the row.
///
/// Always derived from the *actual* file and applied unchanged to the
/// expected file, so row `i` of both files is either kept or dropped together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask(Vec<bool>);

impl ValidityMask {
    /// A row is valid iff none of its three fields is the `NA` sentinel.
    pub fn from_table(table: &Table) -> Self {
        Self(table.rows.iter().map(Reading::is_complete).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows kept.
    pub fn kept(&self) -> usize {
        self.0.iter().filter(|&&keep| keep).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Indices of the rows kept.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect()
    }

    /// Return the `(angle, time, speed)` values of the rows of `table` this
    /// mask keeps.
    ///
    /// The table must have exactly as many rows as the mask. A kept row that
    /// still contains a missing field is an error: it can only come from a
    /// table other than the one the mask was derived from.
    pub fn select(&self, table: &Table) -> Result<Vec<(f64, f64, f64)>, AggregateError> {
        self.check_alignment(table)?;

        self.kept_indices()
            .into_iter()
            .map(|i| {
                table.rows[i]
                    .values()
                    .ok_or(AggregateError::MissingExpected { row: i })
            })
            .collect()
    }

    fn check_alignment(&self, table: &Table) -> Result<(), AggregateError> {
        if table.len() != self.len() {
            return Err(AggregateError::Alignment {
                expected_rows: table.len(),
                actual_rows: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_angle(time: f64, speed: f64) -> Reading {
        Reading {
            angle: None,
            time: Some(time),
            speed: Some(speed),
        }
    }

    #[test]
    fn mask_flags_rows_with_any_sentinel() {
        let table = Table::from_rows(vec![
            Reading::new(0.0, 1.0, 2.0),
            missing_angle(1.0, 2.0),
            Reading {
                speed: None,
                ..Reading::new(0.0, 1.0, 2.0)
            },
            Reading::new(3.0, 4.0, 5.0),
        ]);
        let mask = ValidityMask::from_table(&table);
        assert_eq!(mask.as_slice(), &[true, false, false, true]);
        assert_eq!(mask.kept(), 2);
        assert_eq!(mask.kept_indices(), vec![0, 3]);
    }

    #[test]
    fn select_keeps_same_indices_in_other_table() {
        let actual = Table::from_rows(vec![missing_angle(10.0, 5.0), Reading::new(90.0, 10.0, 5.0)]);
        let expected = Table::from_rows(vec![Reading::new(0.0, 10.0, 5.0), Reading::new(90.0, 2.0, 3.0)]);
        let mask = ValidityMask::from_table(&actual);

        assert_eq!(mask.select(&expected).unwrap(), vec![(90.0, 2.0, 3.0)]);
        assert_eq!(mask.select(&actual).unwrap(), vec![(90.0, 10.0, 5.0)]);
    }

    #[test]
    fn select_rejects_row_count_mismatch() {
        let actual = Table::from_rows(vec![Reading::new(0.0, 1.0, 1.0)]);
        let expected = Table::from_rows(vec![Reading::new(0.0, 1.0, 1.0); 3]);
        let mask = ValidityMask::from_table(&actual);

        assert_eq!(
            mask.select(&expected),
            Err(AggregateError::Alignment {
                expected_rows: 3,
                actual_rows: 1
            })
        );
    }

    #[test]
    fn select_rejects_missing_field_in_kept_row() {
        let actual = Table::from_rows(vec![Reading::new(0.0, 1.0, 1.0), Reading::new(0.0, 1.0, 1.0)]);
        let expected = Table::from_rows(vec![Reading::new(0.0, 1.0, 1.0), missing_angle(1.0, 1.0)]);
        let mask = ValidityMask::from_table(&actual);

        assert_eq!(mask.select(&expected), Err(AggregateError::MissingExpected { row: 1 }));
    }

    #[test]
    fn empty_table_gives_empty_mask() {
        let mask = ValidityMask::from_table(&Table::default());
        assert!(mask.is_empty());
        assert!(mask.select(&Table::default()).unwrap().is_empty());
    }
}
