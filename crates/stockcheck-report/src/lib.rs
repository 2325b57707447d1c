pub mod error;
pub mod filename;
pub mod summary;
pub mod writer;

pub use error::ReportError;
pub use filename::{product_report_filename, sanitize_title, shortage_summary_filename};
pub use summary::{finalize_shortage_report, status_counts, ShortageReport, ShortageStats};
pub use writer::ReportWriter;
