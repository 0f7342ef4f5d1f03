use serde::Serialize;

// ---------------------------------------------------------------------------
// Reading – one CSV row
// ---------------------------------------------------------------------------

/// The literal marker for a missing field.
pub const MISSING_SENTINEL: &str = "NA";

/// One row of a motion log: `angle_degrees,time_seconds,speed_mps`.
///
/// Each field is `None` when the source cell held the [`MISSING_SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Heading in degrees, measured counter-clockwise from East.
    pub angle: Option<f64>,
    /// Duration of the instruction in seconds.
    pub time: Option<f64>,
    /// Speed in metres per second.
    pub speed: Option<f64>,
}

impl Reading {
    /// A fully numeric reading.
    pub fn new(angle: f64, time: f64, speed: f64) -> Self {
        Self {
            angle: Some(angle),
            time: Some(time),
            speed: Some(speed),
        }
    }

    /// True iff none of the three fields is missing.
    pub fn is_complete(&self) -> bool {
        self.angle.is_some() && self.time.is_some() && self.speed.is_some()
    }

    /// `(angle, time, speed)` when every field is present.
    pub fn values(&self) -> Option<(f64, f64, f64)> {
        Some((self.angle?, self.time?, self.speed?))
    }
}

// ---------------------------------------------------------------------------
// Table – a whole file
// ---------------------------------------------------------------------------

/// A loaded motion log: three named columns, one [`Reading`] per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Reading>,
}

impl Table {
    pub fn from_rows(rows: Vec<Reading>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Per-car results
// ---------------------------------------------------------------------------

/// Net displacement and path length of one log, in metres, rounded to 2 dp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Motion {
    pub horizontal: f64,
    pub vertical: f64,
    pub distance: f64,
}

/// Aggregated comparison of one car's expected and actual logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarResult {
    pub expected: Motion,
    pub actual: Motion,
    /// Rows kept by the validity mask.
    pub valid_rows: usize,
    /// Rows in each of the two files.
    pub total_rows: usize,
}

impl CarResult {
    /// `(exp_h, exp_v, act_h, act_v, exp_d, act_d)`
    pub fn into_tuple(self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.expected.horizontal,
            self.expected.vertical,
            self.actual.horizontal,
            self.actual.vertical,
            self.expected.distance,
            self.actual.distance,
        )
    }
}

// ---------------------------------------------------------------------------
// ResultSet – the output of a batch
// ---------------------------------------------------------------------------

/// Six parallel sequences indexed by car, in car-input order.
///
/// Built by appending one [`CarResult`] per car; read-only once the batch
/// returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    expected_horizontal: Vec<f64>,
    expected_vertical: Vec<f64>,
    actual_horizontal: Vec<f64>,
    actual_vertical: Vec<f64>,
    expected_distance: Vec<f64>,
    actual_distance: Vec<f64>,
}

impl ResultSet {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            expected_horizontal: Vec::with_capacity(n),
            expected_vertical: Vec::with_capacity(n),
            actual_horizontal: Vec::with_capacity(n),
            actual_vertical: Vec::with_capacity(n),
            expected_distance: Vec::with_capacity(n),
            actual_distance: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, car: &CarResult) {
        self.expected_horizontal.push(car.expected.horizontal);
        self.expected_vertical.push(car.expected.vertical);
        self.actual_horizontal.push(car.actual.horizontal);
        self.actual_vertical.push(car.actual.vertical);
        self.expected_distance.push(car.expected.distance);
        self.actual_distance.push(car.actual.distance);
    }

    /// Number of cars.
    pub fn len(&self) -> usize {
        self.expected_distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected_distance.is_empty()
    }

    pub fn expected_horizontal(&self) -> &[f64] {
        &self.expected_horizontal
    }

    pub fn expected_vertical(&self) -> &[f64] {
        &self.expected_vertical
    }

    pub fn actual_horizontal(&self) -> &[f64] {
        &self.actual_horizontal
    }

    pub fn actual_vertical(&self) -> &[f64] {
        &self.actual_vertical
    }

    pub fn expected_distance(&self) -> &[f64] {
        &self.expected_distance
    }

    pub fn actual_distance(&self) -> &[f64] {
        &self.actual_distance
    }

    /// The six sequences in their documented order:
    /// expected h, expected v, actual h, actual v, expected d, actual d.
    pub fn as_arrays(&self) -> [&[f64]; 6] {
        [
            &self.expected_horizontal,
            &self.expected_vertical,
            &self.actual_horizontal,
            &self.actual_vertical,
            &self.expected_distance,
            &self.actual_distance,
        ]
    }

    /// Expected and actual motion of car `i`.
    pub fn car(&self, i: usize) -> Option<(Motion, Motion)> {
        if i >= self.len() {
            return None;
        }
        let expected = Motion {
            horizontal: self.expected_horizontal[i],
            vertical: self.expected_vertical[i],
            distance: self.expected_distance[i],
        };
        let actual = Motion {
            horizontal: self.actual_horizontal[i],
            vertical: self.actual_vertical[i],
            distance: self.actual_distance[i],
        };
        Some((expected, actual))
    }

    pub fn cars(&self) -> impl Iterator<Item = (Motion, Motion)> + '_ {
        (0..self.len()).filter_map(|i| self.car(i))
    }

    /// Expected positions as `[h, v]` points.
    pub fn expected_positions(&self) -> Vec<[f64; 2]> {
        zip_points(&self.expected_horizontal, &self.expected_vertical)
    }

    /// Actual positions as `[h, v]` points.
    pub fn actual_positions(&self) -> Vec<[f64; 2]> {
        zip_points(&self.actual_horizontal, &self.actual_vertical)
    }
}

fn zip_points(h: &[f64], v: &[f64]) -> Vec<[f64; 2]> {
    h.iter().zip(v).map(|(&x, &y)| [x, y]).collect()
}
