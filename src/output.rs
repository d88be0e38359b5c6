//! CSV output collaborator.
//!
//! Consumes the final record sequence; knows nothing about how it was
//! produced. Column order and header names come from the serde attributes
//! on [`HarvestRecord`].

use std::path::Path;

use crate::error::Result;
use crate::types::HarvestRecord;

/// Write records to a CSV file, header included. Overwrites existing files.
pub fn write_csv(records: &[HarvestRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
