/// View layer
///
/// - `upload_form.rs` - picker, progress bar, error line, submit button
/// - `grid.rs` - thumbnail grid with per-image delete, or the empty-state message

pub mod grid;
pub mod upload_form;
