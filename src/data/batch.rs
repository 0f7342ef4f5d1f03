use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::aggregate::aggregate;
use super::error::{BatchError, Role};
use super::loader;
use super::model::ResultSet;

// ---------------------------------------------------------------------------
// BatchRequest – validated, index-aligned file lists
// ---------------------------------------------------------------------------

/// Expected and actual file lists; entry `i` of each describes car `i`.
///
/// Only constructible through the shape gate, so a `BatchRequest` always
/// holds two non-empty lists of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    expected: Vec<PathBuf>,
    actual: Vec<PathBuf>,
}

impl BatchRequest {
    pub fn new<P: Into<PathBuf>>(
        expected: impl IntoIterator<Item = P>,
        actual: impl IntoIterator<Item = P>,
    ) -> Result<Self, BatchError> {
        let expected: Vec<PathBuf> = expected.into_iter().map(Into::into).collect();
        let actual: Vec<PathBuf> = actual.into_iter().map(Into::into).collect();

        check_not_empty(Role::Expected, &expected)?;
        check_not_empty(Role::Actual, &actual)?;
        check_not_blank(Role::Expected, &expected)?;
        check_not_blank(Role::Actual, &actual)?;
        if expected.len() != actual.len() {
            return Err(BatchError::InputShape {
                role: Role::Actual,
                reason: format!(
                    "has {} entries but `expected` has {}",
                    actual.len(),
                    expected.len()
                ),
            });
        }

        Ok(Self { expected, actual })
    }

    /// Build a request from a JSON object `{"expected": [...], "actual": [...]}`.
    ///
    /// Both members must be non-empty arrays of strings. Nothing is read from
    /// disk here.
    pub fn from_json(value: &JsonValue) -> Result<Self, BatchError> {
        let expected = json_string_list(value, Role::Expected)?;
        let actual = json_string_list(value, Role::Actual)?;
        Self::new(expected, actual)
    }

    /// Read a JSON manifest from disk.
    ///
    /// Relative file names resolve against the manifest's own directory.
    pub fn from_manifest(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let root: JsonValue = serde_json::from_str(&text).context("parsing manifest JSON")?;
        let request = Self::from_json(&root)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(request.resolve_against(base))
    }

    fn resolve_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            expected: self.expected.into_iter().map(resolve).collect(),
            actual: self.actual.into_iter().map(resolve).collect(),
        }
    }

    /// Number of cars.
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    pub fn expected(&self) -> &[PathBuf] {
        &self.expected
    }

    pub fn actual(&self) -> &[PathBuf] {
        &self.actual
    }
}

fn check_not_empty(role: Role, list: &[PathBuf]) -> Result<(), BatchError> {
    if list.is_empty() {
        return Err(BatchError::InputShape {
            role,
            reason: "name list cannot be empty".into(),
        });
    }
    Ok(())
}

fn check_not_blank(role: Role, list: &[PathBuf]) -> Result<(), BatchError> {
    if let Some(i) = list.iter().position(|p| p.as_os_str().is_empty()) {
        return Err(BatchError::InputShape {
            role,
            reason: format!("entry [{i}] is an empty file name"),
        });
    }
    Ok(())
}

fn json_string_list(root: &JsonValue, role: Role) -> Result<Vec<String>, BatchError> {
    let key = role.to_string();
    let shape_err = |reason: String| BatchError::InputShape { role, reason };

    let items = root
        .get(&key)
        .ok_or_else(|| shape_err(format!("missing `{key}` member")))?
        .as_array()
        .ok_or_else(|| shape_err("needs to be a list".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| shape_err(format!("entry [{i}] needs to be a string")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Batch execution
// ---------------------------------------------------------------------------

/// Process every car in order and collect the six result sequences.
///
/// The first failure aborts the batch; no partial results are returned.
pub fn run_batch(request: &BatchRequest) -> Result<ResultSet, BatchError> {
    let mut results = ResultSet::with_capacity(request.len());

    for (index, (expected_path, actual_path)) in
        request.expected.iter().zip(&request.actual).enumerate()
    {
        let actual = loader::load(actual_path)
            .map_err(|e| BatchError::from_load(Role::Actual, index, actual_path.clone(), e))?;
        let expected = loader::load(expected_path)
            .map_err(|e| BatchError::from_load(Role::Expected, index, expected_path.clone(), e))?;

        let car = aggregate(&actual, &expected)
            .map_err(|source| BatchError::Aggregate { index, source })?;

        if car.valid_rows < car.total_rows {
            log::warn!(
                "car{index}: {} of {} rows contain NA and were excluded from both files",
                car.total_rows - car.valid_rows,
                car.total_rows
            );
        }
        log::info!(
            "car{index}: expected ({:.2}, {:.2}) {:.2} m, actual ({:.2}, {:.2}) {:.2} m",
            car.expected.horizontal,
            car.expected.vertical,
            car.expected.distance,
            car.actual.horizontal,
            car.actual.vertical,
            car.actual.distance
        );

        results.push(&car);
    }

    log::info!("Processed {} cars", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_accepts_aligned_lists() {
        let req = BatchRequest::new(["e1.csv", "e2.csv"], ["a1.csv", "a2.csv"]).unwrap();
        assert_eq!(req.len(), 2);
        assert_eq!(req.actual()[1], PathBuf::from("a2.csv"));
    }

    #[test]
    fn new_rejects_empty_list() {
        let err = BatchRequest::new(Vec::<String>::new(), vec!["a.csv".to_string()]).unwrap_err();
        assert!(matches!(err, BatchError::InputShape { role: Role::Expected, .. }));
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = BatchRequest::new(["e.csv"], [""]).unwrap_err();
        assert!(matches!(err, BatchError::InputShape { role: Role::Actual, .. }));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = BatchRequest::new(["e1.csv", "e2.csv"], ["a1.csv"]).unwrap_err();
        assert!(matches!(err, BatchError::InputShape { .. }));
        assert!(err.to_string().contains("has 1 entries"));
    }

    #[test]
    fn from_json_rejects_non_list() {
        let err = BatchRequest::from_json(&json!({
            "expected": "not_a_list",
            "actual": ["a1.csv"],
        }))
        .unwrap_err();
        assert!(matches!(err, BatchError::InputShape { role: Role::Expected, .. }));
        assert_eq!(err.index(), None);
    }

    #[test]
    fn from_json_rejects_non_string_entry() {
        let err = BatchRequest::from_json(&json!({
            "expected": ["e1.csv", "e2.csv"],
            "actual": ["a1.csv", 2],
        }))
        .unwrap_err();
        assert!(matches!(err, BatchError::InputShape { role: Role::Actual, .. }));
        assert!(err.to_string().contains("entry [1]"));
    }

    #[test]
    fn from_json_rejects_missing_member() {
        let err = BatchRequest::from_json(&json!({ "expected": ["e1.csv"] })).unwrap_err();
        assert_eq!(err.role(), Some(Role::Actual));
    }

    #[test]
    fn shape_gate_runs_before_any_io() {
        // The first actual file does not exist, but the gate fails first on
        // the non-list expected member.
        let err = BatchRequest::from_json(&json!({
            "expected": 42,
            "actual": ["/definitely/not/here.csv"],
        }))
        .unwrap_err();
        assert!(matches!(err, BatchError::InputShape { .. }));
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let abs = std::env::temp_dir().join("a.csv");
        let req = BatchRequest::new(vec![PathBuf::from("e.csv")], vec![abs.clone()])
            .unwrap()
            .resolve_against(Path::new("/data/run1"));
        assert_eq!(req.expected()[0], PathBuf::from("/data/run1/e.csv"));
        assert_eq!(req.actual()[0], abs);
    }
}
