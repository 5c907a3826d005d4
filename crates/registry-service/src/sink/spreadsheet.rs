//! Spreadsheet log of created users
//!
//! Rows are appended to a CSV file by a background task that owns the file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use registry_core::{DomainEvent, UserCreatedEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::UserEventSink;

/// Header row written when the file is created
pub const SPREADSHEET_HEADER: [&str; 5] =
    ["No", "Full name", "Phone number", "Telegram user", "Created at"];

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CHANNEL_CAPACITY: usize = 1024;

/// Spreadsheet write failures
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Appends numbered rows to a CSV file
#[derive(Debug)]
pub struct SpreadsheetWriter {
    path: PathBuf,
    /// Data rows known to be in the file, counted lazily on first write
    rows: Option<u64>,
}

impl SpreadsheetWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row and return its sequence number
    pub fn append(&mut self, event: &UserCreatedEvent) -> Result<u64, SinkError> {
        // An empty file is treated like a missing one and gets the header
        let has_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() > 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                false
            }
            Err(e) => return Err(e.into()),
        };

        let number = if has_header {
            let rows = match self.rows {
                Some(rows) => rows,
                None => count_rows(&self.path)?,
            };
            rows + 1
        } else {
            1
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !has_header {
            writer.write_record(SPREADSHEET_HEADER)?;
        }
        writer.write_record([
            number.to_string(),
            event.full_name.clone(),
            event.phone_number.clone(),
            event.tg_user.clone(),
            event.created_at.format(CREATED_AT_FORMAT).to_string(),
        ])?;
        writer.flush()?;

        self.rows = Some(number);
        Ok(number)
    }
}

/// Data rows below the header
fn count_rows(path: &Path) -> Result<u64, SinkError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut rows = 0;
    for record in reader.byte_records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

/// Fire-and-forget sink backed by a [`SpreadsheetWriter`] task
#[derive(Debug, Clone)]
pub struct SpreadsheetSink {
    tx: mpsc::Sender<UserCreatedEvent>,
}

impl SpreadsheetSink {
    /// Start the writer task
    ///
    /// The task ends once every clone of the sink has been dropped and the
    /// queue is drained.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let writer = SpreadsheetWriter::new(path);
        info!(path = %writer.path().display(), "Spreadsheet sink started");

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = tokio::spawn(run_writer(rx, writer));
        (Self { tx }, handle)
    }
}

impl UserEventSink for SpreadsheetSink {
    fn publish(&self, event: DomainEvent) {
        let DomainEvent::UserCreated(created) = event else {
            return;
        };
        let user_id = created.user_id;
        if let Err(e) = self.tx.try_send(created) {
            warn!(user_id, error = %e, "Spreadsheet sink dropped event");
        }
    }
}

async fn run_writer(mut rx: mpsc::Receiver<UserCreatedEvent>, mut writer: SpreadsheetWriter) {
    while let Some(event) = rx.recv().await {
        let path = writer.path().to_path_buf();
        let joined = tokio::task::spawn_blocking(move || {
            let result = writer.append(&event);
            (writer, event.user_id, result)
        })
        .await;

        writer = match joined {
            Ok((writer, user_id, Ok(number))) => {
                debug!(user_id, row = number, "Spreadsheet row appended");
                writer
            }
            Ok((writer, user_id, Err(e))) => {
                error!(user_id, path = %path.display(), error = %e, "Failed to append spreadsheet row");
                writer
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Spreadsheet writer panicked");
                SpreadsheetWriter::new(path)
            }
        };
    }
    debug!("Spreadsheet sink stopped");
}
