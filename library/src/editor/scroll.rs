//! When a control keeps wheel input instead of letting the canvas pan.

/// A multiline box keeps the wheel while its content overflows the viewport.
pub fn multiline_keeps_wheel(viewport_height: f32, content_height: f32) -> bool {
    viewport_height < content_height
}

/// A number field keeps the wheel while it has keyboard focus.
pub fn number_keeps_wheel(has_focus: bool) -> bool {
    has_focus
}
