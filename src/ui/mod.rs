/// UI components
///
/// - uploader.rs: drop zone, preview and file picker button
/// - result.rs: loading / result / idle panel
/// - meter.rs: canvas confidence gauge

pub mod meter;
pub mod result;
pub mod uploader;
