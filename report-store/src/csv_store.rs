//! Report store backed by an append-only CSV file.
//!
//! The next id is recovered once at open by scanning existing rows; afterwards the store owns
//! the counter and serializes appends, so concurrent callers never share an id. File access
//! runs on tokio's blocking pool.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::error::StorageError;
use crate::models::{NewReport, Report};
use crate::repository::ReportStore;

/// Header row written when the file is created.
pub const CSV_HEADER: [&str; 8] = [
    "ReportID",
    "User",
    "ImageFile",
    "Latitude",
    "Longitude",
    "Type",
    "Priority",
    "Status",
];

pub struct CsvReportStore {
    file: Arc<ReportFile>,
}

/// The file and its id counter; every method blocks.
struct ReportFile {
    path: PathBuf,
    next_id: Mutex<u64>,
}

impl CsvReportStore {
    /// Opens the store at `path`, creating it (and its parent directory) with the header row
    /// if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
            info!(path = %path.display(), "Created report store");
        }

        let last_id = scan(&path)?
            .map(|report| report.report_id)
            .max()
            .unwrap_or(0);
        info!(path = %path.display(), next_id = last_id + 1, "Report store opened");

        Ok(Self {
            file: Arc::new(ReportFile {
                path,
                next_id: Mutex::new(last_id + 1),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

impl ReportFile {
    fn lock_counter(&self) -> MutexGuard<'_, u64> {
        // A panic mid-append leaves the counter at its last committed value.
        self.next_id.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn append(&self, report: NewReport) -> Result<Report, StorageError> {
        let mut next_id = self.lock_counter();
        let report = report.into_report(*next_id);
        self.append_row(&report)?;
        *next_id += 1;
        Ok(report)
    }

    fn find(&self, id: u64, user: &str) -> Result<Option<Report>, StorageError> {
        let _guard = self.lock_counter();
        let found = scan(&self.path)?.find(|r| r.report_id == id && r.user == user);
        Ok(found)
    }

    fn append_row(&self, report: &Report) -> Result<(), StorageError> {
        let file: File = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(report)?;
        let mut file = writer
            .into_inner()
            .map_err(|e| StorageError::Io(e.into_error()))?;
        file.flush()?;
        Ok(())
    }
}

/// Iterates every readable row from the start of the file. Unreadable rows are skipped.
fn scan(path: &Path) -> Result<impl Iterator<Item = Report>, StorageError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    Ok(reader
        .into_deserialize::<Report>()
        .filter_map(|row| match row {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable report row");
                None
            }
        }))
}

#[async_trait]
impl ReportStore for CsvReportStore {
    #[instrument(skip(self, report), fields(user = %report.user, issue_type = %report.issue_type))]
    async fn append(&self, report: NewReport) -> Result<Report, StorageError> {
        let file = Arc::clone(&self.file);
        let report = tokio::task::spawn_blocking(move || file.append(report)).await??;

        info!(report_id = report.report_id, "Report appended");
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_user(
        &self,
        id: u64,
        user: &str,
    ) -> Result<Option<Report>, StorageError> {
        let file = Arc::clone(&self.file);
        let user = user.to_string();
        tokio::task::spawn_blocking(move || file.find(id, &user)).await?
    }
}
