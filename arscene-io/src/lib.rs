//! Loading of ARKit capture datasets
//!
//! A capture is four header-named delimited files: the point cloud, the
//! detected plane anchors, the device camera path and the detected objects.
//! This crate reads them into typed records, validating every numeric cell
//! instead of coercing bad values.

pub mod table;
pub mod records;
pub mod loader;
pub mod error;

pub use error::*;
pub use records::*;
pub use loader::{
    load_dataset, load_dataset_blocking, parse_records, read_records, Dataset, DatasetPaths,
    LoadReport, RowPolicy, SourceReport,
};
pub use table::{Delimiter, Table};
