//! Keeps mouse-wheel input inside a picker control.

use egui::Ui;

/// Swallows this frame's wheel delta when `keep` holds and the pointer is over
/// the control, so the canvas behind it does not pan.
pub fn contain_wheel(ui: &Ui, hovered: bool, keep: bool) -> bool {
    if !(hovered && keep) {
        return false;
    }
    ui.ctx().input_mut(|i| {
        i.raw_scroll_delta = egui::Vec2::ZERO;
        i.smooth_scroll_delta = egui::Vec2::ZERO;
    });
    true
}
