//! Per-picker UI state that lives across frames.

#[derive(Default)]
pub struct PickerState {
    /// Whether the asset selection modal is showing.
    pub modal_open: bool,
    /// Text of the number field while it has focus.
    pub number_text: Option<String>,
}
