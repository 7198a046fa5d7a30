mod export;
mod markdown;
pub mod views;

pub use export::{render_export, ExportError, ExportFormat, RenderedExport};
pub use markdown::{render_markdown, REPORT_TITLE};
