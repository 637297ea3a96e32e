//! Output persistence.
//!
//! The document is written to a uniquely named temporary file in the
//! destination directory and renamed over the destination, so readers never
//! observe a half-written file and concurrent runs never share a temp file.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::aggregator::document::MetricsDocument;
use crate::aggregator::types::AggregateResult;

/// Write `document` to `path`, replacing any previous file.
pub fn write_document(
    path: &Path,
    document: &MetricsDocument,
    pretty: bool,
) -> AggregateResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // dropped (and deleted) on any early return
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        if pretty {
            serde_json::to_writer_pretty(&mut writer, document)?;
        } else {
            serde_json::to_writer(&mut writer, document)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
