//! Compare expected and actual microcar motion logs.
//!
//! Each car has two CSV logs of `angle,time,speed` instructions. Rows with a
//! missing reading in the actual log are dropped from both logs, and the rest
//! are reduced to net displacement and distance travelled.

pub mod data;

pub use data::batch::{BatchRequest, run_batch};
pub use data::error::{AggregateError, BatchError, LoadError, Role};
pub use data::model::{CarResult, Motion, Reading, ResultSet, Table};
