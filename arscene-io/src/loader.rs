//! All-or-nothing loading of the four capture sources

use crate::error::{LoadError, Result};
use crate::records::*;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do with a row whose cells are missing or not numeric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Fail the whole load on the first malformed row
    Strict,
    /// Drop the row and count it in the load report
    #[default]
    Skip,
}

/// Locations of the four capture sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    pub points: PathBuf,
    pub anchors: PathBuf,
    pub camera: PathBuf,
    pub objects: PathBuf,
}

impl DatasetPaths {
    /// `<dir>/<prefix>_points.csv`, `_anchors.csv`, `_camera.csv`, `_objects.csv`
    pub fn with_prefix<P: AsRef<Path>>(dir: P, prefix: &str) -> Self {
        let dir = dir.as_ref();
        let file = |kind: &str| dir.join(format!("{}_{}.csv", prefix, kind));
        Self {
            points: file("points"),
            anchors: file("anchors"),
            camera: file("camera"),
            objects: file("objects"),
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::with_prefix("data", "spotmeka")
    }
}

/// Row counts for one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub accepted: usize,
    pub skipped: usize,
}

/// Row counts for a whole dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub points: SourceReport,
    pub anchors: SourceReport,
    pub camera: SourceReport,
    pub objects: SourceReport,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.points.skipped + self.anchors.skipped + self.camera.skipped + self.objects.skipped
    }
}

/// The four capture sources, each in source row order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub points: Vec<PointSample>,
    pub anchors: Vec<AnchorRecord>,
    pub camera_path: Vec<CameraPathPoint>,
    pub objects: Vec<ObjectRecord>,
    pub report: LoadReport,
}

/// Parse the records of one source from its text
pub fn parse_records<T: FromRow + std::fmt::Debug>(
    source: &str,
    text: &str,
    policy: RowPolicy,
) -> Result<(Vec<T>, SourceReport)> {
    let table = Table::parse(source, text)?;
    table.require_columns(T::COLUMNS)?;

    let mut records = Vec::with_capacity(table.len());
    let mut report = SourceReport::default();

    for row in table.rows() {
        match T::from_row(&row) {
            Ok(record) => {
                records.push(record);
                report.accepted += 1;
            }
            Err(message) => match policy {
                RowPolicy::Strict => {
                    return Err(LoadError::MalformedRow {
                        path: source.to_string(),
                        line: row.line,
                        message,
                    })
                }
                RowPolicy::Skip => {
                    warn!("{}:{}: skipping row: {}", source, row.line, message);
                    report.skipped += 1;
                }
            },
        }
    }

    if let Some(first) = records.first() {
        debug!("{}: first record {:?}", source, first);
    }
    info!(
        "{}: {} rows accepted, {} skipped",
        source, report.accepted, report.skipped
    );

    Ok((records, report))
}

/// Read and parse the records of one source file
pub async fn read_records<T: FromRow + std::fmt::Debug>(
    path: &Path,
    policy: RowPolicy,
) -> Result<(Vec<T>, SourceReport)> {
    let source = path.display().to_string();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: source.clone(),
            }
        } else {
            LoadError::Io(e)
        }
    })?;
    parse_records(&source, &text, policy)
}

/// Load all four sources concurrently.
///
/// Either every source loads or the first error is returned; a partial
/// dataset is never produced.
pub async fn load_dataset(paths: &DatasetPaths, policy: RowPolicy) -> Result<Dataset> {
    let (points, anchors, camera, objects) = tokio::try_join!(
        read_records::<PointSample>(&paths.points, policy),
        read_records::<AnchorRecord>(&paths.anchors, policy),
        read_records::<CameraPathPoint>(&paths.camera, policy),
        read_records::<ObjectRecord>(&paths.objects, policy),
    )?;

    let report = LoadReport {
        points: points.1,
        anchors: anchors.1,
        camera: camera.1,
        objects: objects.1,
    };
    if report.total_skipped() > 0 {
        warn!("{} malformed rows skipped across the dataset", report.total_skipped());
    }

    Ok(Dataset {
        points: points.0,
        anchors: anchors.0,
        camera_path: camera.0,
        objects: objects.0,
        report,
    })
}

/// [`load_dataset`] on a private current-thread runtime
pub fn load_dataset_blocking(paths: &DatasetPaths, policy: RowPolicy) -> Result<Dataset> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(load_dataset(paths, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ANCHOR_HEADER: &str = "pos_x,pos_y,pos_z,rot_w,rot_x,rot_y,rot_z,width,length,orientation";

    fn write_dataset(dir: &TempDir, points: &str) -> DatasetPaths {
        let paths = DatasetPaths::with_prefix(dir.path(), "capture");
        fs::write(&paths.points, points).unwrap();
        fs::write(
            &paths.anchors,
            format!("{}\n0.1,0.2,0.3,1,0,0,0,2,3,HorizontalPlaneAnchor\n", ANCHOR_HEADER),
        )
        .unwrap();
        fs::write(&paths.camera, "x,y,z\n0,0,0\n1,0,0\n2,0,0\n").unwrap();
        fs::write(&paths.objects, "pos_x,pos_y,pos_z,width,length\n1,1,1,0.5,0.5\n").unwrap();
        paths
    }

    #[test]
    fn test_with_prefix_names() {
        let paths = DatasetPaths::with_prefix("data", "spotmeka");
        assert_eq!(paths.points, PathBuf::from("data/spotmeka_points.csv"));
        assert_eq!(paths.objects, PathBuf::from("data/spotmeka_objects.csv"));
    }

    #[test]
    fn test_skip_policy_counts_malformed_rows() {
        let text = "x,y,z\n1,2,3\n1,,3\nfoo,2,3\n4,5,6\n";
        let (points, report) = parse_records::<PointSample>("mem", text, RowPolicy::Skip).unwrap();
        assert_eq!(points, vec![PointSample::new(1.0, 2.0, 3.0), PointSample::new(4.0, 5.0, 6.0)]);
        assert_eq!(report, SourceReport { accepted: 2, skipped: 2 });
    }

    #[test]
    fn test_strict_policy_fails_on_first_malformed_row() {
        let text = "x,y,z\n1,2,3\n1,,3\n";
        match parse_records::<PointSample>("points.csv", text, RowPolicy::Strict) {
            Err(LoadError::MalformedRow { path, line, message }) => {
                assert_eq!(path, "points.csv");
                assert_eq!(line, 3);
                assert!(message.contains("'y'"));
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_fails_under_any_policy() {
        for policy in [RowPolicy::Skip, RowPolicy::Strict] {
            let result = parse_records::<ObjectRecord>("objects.csv", "pos_x,pos_y,pos_z\n1,2,3\n", policy);
            assert!(matches!(result, Err(LoadError::MissingColumn { .. })));
        }
    }

    #[tokio::test]
    async fn test_load_dataset_preserves_order() {
        let dir = TempDir::new().unwrap();
        let paths = write_dataset(&dir, "x,y,z\n0,0,0\n0,2,0\n0,1,0\n");

        let dataset = load_dataset(&paths, RowPolicy::Skip).await.unwrap();
        let ys: Vec<f32> = dataset.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 2.0, 1.0]);
        assert_eq!(dataset.anchors.len(), 1);
        assert_eq!(dataset.camera_path.len(), 3);
        assert_eq!(dataset.camera_path[2].x, 2.0);
        assert_eq!(dataset.objects.len(), 1);
        assert_eq!(dataset.report.total_skipped(), 0);
    }

    #[tokio::test]
    async fn test_missing_source_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let paths = write_dataset(&dir, "x,y,z\n0,0,0\n");
        fs::remove_file(&paths.camera).unwrap();

        match load_dataset(&paths, RowPolicy::Skip).await {
            Err(LoadError::FileNotFound { path }) => assert!(path.ends_with("capture_camera.csv")),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_blocking_load() {
        let dir = TempDir::new().unwrap();
        let paths = write_dataset(&dir, "x,y,z\n0,0,0\nbad,0,0\n");
        let dataset = load_dataset_blocking(&paths, RowPolicy::Skip).unwrap();
        assert_eq!(dataset.points.len(), 1);
        assert_eq!(dataset.report.points.skipped, 1);
    }
}
