//! Parquet export of the ranked need/capacity join

use std::path::Path;

use parquet::arrow::ArrowWriter;

use crate::algorithm::Prioritization;
use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::models::JoinedRecord;

/// Write the ranked joined records to a Parquet file, returning the row count
pub fn write_prioritization_parquet(prioritization: &Prioritization, path: &Path) -> Result<usize> {
    let batch = JoinedRecord::to_record_batch(&prioritization.joined)?;

    let file = safe_create_file(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log::info!(
        "Wrote {} prioritized locations to {}",
        batch.num_rows(),
        path.display()
    );
    Ok(batch.num_rows())
}
