//! Sizing and colors of the picker controls.

use egui::{Color32, Vec2};

pub struct PickerTheme {
    /// Width of single-line text, number and dropdown fields.
    pub field_width: f32,
    /// Rows shown by the multiline editor before it scrolls.
    pub multiline_rows: usize,
    /// Height at which the multiline editor starts scrolling.
    pub multiline_max_height: f32,
    /// Color of the placeholder shown for pickers without an editor.
    pub placeholder_color: Color32,
    /// Size of the asset selection modal.
    pub modal_size: Vec2,
}

impl Default for PickerTheme {
    fn default() -> Self {
        Self {
            field_width: 160.0,
            multiline_rows: 4,
            multiline_max_height: 80.0,
            placeholder_color: Color32::from_rgb(200, 120, 120),
            modal_size: Vec2::new(320.0, 360.0),
        }
    }
}
