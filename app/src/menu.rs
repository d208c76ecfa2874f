use eframe::egui::{self, Button};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    OpenProject,
    SaveProject,
    ResetDemo,
    Undo,
    Redo,
    SaveSettings,
}

pub fn menu_bar(
    ui: &mut egui::Ui,
    can_undo: bool,
    can_redo: bool,
    triggered: &mut Option<MenuCommand>,
) {
    egui::MenuBar::new().ui(ui, |ui| {
        ui.menu_button("File", |ui| {
            for (command, text) in [
                (MenuCommand::OpenProject, "Open…"),
                (MenuCommand::SaveProject, "Save As…"),
                (MenuCommand::ResetDemo, "Reset demo project"),
                (MenuCommand::SaveSettings, "Save picker settings"),
            ] {
                if ui.button(text).clicked() {
                    *triggered = Some(command);
                    ui.close();
                }
            }
        });
        ui.menu_button("Edit", |ui| {
            let undo = Button::new("Undo").shortcut_text("Ctrl+Z");
            if ui.add_enabled(can_undo, undo).clicked() {
                *triggered = Some(MenuCommand::Undo);
                ui.close();
            }
            let redo = Button::new("Redo").shortcut_text("Ctrl+Shift+Z");
            if ui.add_enabled(can_redo, redo).clicked() {
                *triggered = Some(MenuCommand::Redo);
                ui.close();
            }
        });
    });
}

/// Ctrl+Z / Ctrl+Shift+Z, consumed so text fields do not see them.
pub fn shortcut_command(ctx: &egui::Context) -> Option<MenuCommand> {
    let redo = egui::KeyboardShortcut::new(
        egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
        egui::Key::Z,
    );
    let undo = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
    ctx.input_mut(|i| {
        if i.consume_shortcut(&redo) {
            Some(MenuCommand::Redo)
        } else if i.consume_shortcut(&undo) {
            Some(MenuCommand::Undo)
        } else {
            None
        }
    })
}
