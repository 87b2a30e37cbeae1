//! Pre-flight checks
//!
//! Verifies that everything an export run needs on the local filesystem is
//! actually accessible before any database or network traffic happens:
//! the credential file must be readable, the database file must be readable,
//! and the database's directory must be writable (SQLite creates journal
//! files next to the database).

use crate::domain::{Result, SheetporterError};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Run all pre-flight checks for an export run.
pub fn pre_flight_checks(creds_path: &Path, db_path: &Path) -> Result<()> {
    check_credentials_file(creds_path)?;
    check_database_access(db_path)?;
    tracing::debug!(
        creds = %creds_path.display(),
        db = %db_path.display(),
        "Pre-flight checks passed"
    );
    Ok(())
}

/// The credential file must exist and be readable.
fn check_credentials_file(path: &Path) -> Result<()> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SheetporterError::LocalFile(format!(
            "Service account file not found at: {}",
            path.display()
        )),
        std::io::ErrorKind::PermissionDenied => SheetporterError::LocalFile(format!(
            "Read permission denied for service account file: {}\n\
             💡 On macOS, check System Settings > Privacy & Security > Files and Folders \
             to ensure your terminal has access.",
            path.display()
        )),
        _ => SheetporterError::LocalFile(format!(
            "Cannot open service account file {}: {}",
            path.display(),
            e
        )),
    })?;
    Ok(())
}

/// The database file must be readable and its directory writable.
fn check_database_access(db_path: &Path) -> Result<()> {
    File::open(db_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SheetporterError::LocalFile(format!(
            "Database file not found at: {}",
            db_path.display()
        )),
        _ => SheetporterError::LocalFile(format!(
            "Cannot open database file {}: {}",
            db_path.display(),
            e
        )),
    })?;

    let db_dir = db_path.parent().unwrap_or_else(|| Path::new("."));
    let probe = db_dir.join(".permission_test");
    let write_result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe);

    match write_result {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(SheetporterError::LocalFile(format!(
            "Permission denied for database directory: {}\n\
             \x20 Original error: {e:?}\n\
             💡 SQLite needs read access to the DB file and write access to its directory.",
            db_dir.display()
        ))),
    }
}
