//! The CSV dataset sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use faultline_core::errors::ExportError;
use faultline_core::traits::DatasetSink;
use faultline_core::types::method::MethodInventory;
use faultline_core::types::report::LabelReport;

use crate::csv::write_record;

const METHOD_HEADER: &[&str] = &[
    "release",
    "file",
    "method",
    "start_line",
    "end_line",
    "revisions",
    "added_lines",
    "deleted_lines",
    "author_count",
    "buggy",
];

const AUDIT_HEADER: &[&str] = &["ticket", "commit", "method", "release"];

/// Writes the dataset and the audit trail as two CSV streams.
///
/// Generic over the writer so tests can capture output in memory; the
/// `create` constructor wires the conventional on-disk layout.
pub struct CsvSink<W: Write> {
    methods: W,
    audit: W,
}

impl CsvSink<BufWriter<File>> {
    /// Create `<project>-methods.csv` and `<project>-audit.csv` in `dir`.
    pub fn create(dir: &Path, project: &str) -> Result<Self, ExportError> {
        let open = |suffix: &str| -> Result<BufWriter<File>, ExportError> {
            let path = dir.join(format!("{project}-{suffix}.csv"));
            Ok(BufWriter::new(File::create(path)?))
        };
        Ok(Self::new(open("methods")?, open("audit")?))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(methods: W, audit: W) -> Self {
        Self { methods, audit }
    }

    /// Flush and return the underlying writers.
    pub fn into_inner(mut self) -> Result<(W, W), ExportError> {
        self.methods.flush()?;
        self.audit.flush()?;
        Ok((self.methods, self.audit))
    }
}

impl<W: Write> DatasetSink for CsvSink<W> {
    fn write_methods(&mut self, inventory: &MethodInventory) -> Result<(), ExportError> {
        write_record(&mut self.methods, METHOD_HEADER)?;
        for (_, record) in inventory.iter() {
            write_record(
                &mut self.methods,
                &[
                    &record.release,
                    &record.file,
                    &record.name,
                    &record.start_line.to_string(),
                    &record.end_line.to_string(),
                    &record.revisions.to_string(),
                    &record.added_lines.to_string(),
                    &record.deleted_lines.to_string(),
                    &record.author_count.to_string(),
                    if record.buggy { "yes" } else { "no" },
                ],
            )?;
        }
        self.methods.flush()?;
        tracing::info!(rows = inventory.len(), "wrote method dataset");
        Ok(())
    }

    fn write_audit(&mut self, report: &LabelReport) -> Result<(), ExportError> {
        write_record(&mut self.audit, AUDIT_HEADER)?;
        for row in &report.audit {
            write_record(
                &mut self.audit,
                &[&row.ticket, &row.commit, &row.method, &row.release],
            )?;
        }
        self.audit.flush()?;
        tracing::info!(
            rows = report.audit.len(),
            flagged = report.total_flagged(),
            "wrote attribution audit"
        );
        Ok(())
    }
}
