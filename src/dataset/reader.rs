//! CSV file loading into Arrow record batches

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;

use crate::error::util::safe_open_file;
use crate::error::{AnalysisError, Result};
use crate::utils::{log_operation_complete, log_operation_start};

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Read a CSV file with a header row into Arrow record batches
///
/// The schema is inferred from the whole file. Empty cells are read as nulls.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading CSV file", path);

    let mut file = safe_open_file(path, "reading CSV dataset")?;

    let format = Format::default().with_header(true);
    let (schema, records) = format.infer_schema(&mut file, None)?;
    file.rewind().map_err(|e| AnalysisError::io(path, e))?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, records, Some(start.elapsed()));
    Ok(batches)
}
