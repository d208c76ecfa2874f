use eframe::egui::{self, RichText};
use egui_internal_picker::InternalPicker;
use flow_library::editor::EditorEvent;
use flow_library::model::{FlowNode, NodeSocket};
use uuid::Uuid;

/// Mounted pickers of one node, one per internal.
pub struct NodeView {
    pub node_id: Uuid,
    pub pickers: Vec<InternalPicker>,
}

#[derive(Default)]
pub struct NodeViewOutput {
    /// (internal name, event) for everything the pickers committed this frame.
    pub events: Vec<(String, EditorEvent)>,
    /// Right click on the card outside any picker.
    pub context_menu_at: Option<egui::Pos2>,
}

fn socket_row(ui: &mut egui::Ui, socket: &NodeSocket, arrow: &str) {
    ui.label(
        RichText::new(format!("{} {} : {:?}", arrow, socket.name, socket.data_type)).small(),
    );
}

pub fn show_node(ui: &mut egui::Ui, node: &FlowNode, view: &mut NodeView) -> NodeViewOutput {
    let mut output = NodeViewOutput::default();
    let mut picker_consumed_click = false;

    let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(220.0);
        ui.strong(&node.name);
        for socket in &node.inputs {
            socket_row(ui, socket, "▶");
        }
        ui.separator();

        for (picker, internal) in view.pickers.iter_mut().zip(&node.internals) {
            ui.horizontal(|ui| {
                ui.label(&internal.name);
                let response = picker.show(ui);
                picker_consumed_click |= response.consumed_secondary_click;
                output.events.extend(
                    response
                        .events
                        .into_iter()
                        .map(|event| (internal.name.clone(), event)),
                );
            });
        }

        if !node.outputs.is_empty() {
            ui.separator();
        }
        for socket in &node.outputs {
            socket_row(ui, socket, "◀");
        }
        if let Some(size) = node.size {
            ui.weak(format!("{:.0} × {:.0}", size.x, size.y));
        }
    });

    let rect = frame.response.rect;
    if !picker_consumed_click {
        output.context_menu_at = ui.input(|i| {
            let pos = i.pointer.interact_pos()?;
            (i.pointer.button_clicked(egui::PointerButton::Secondary) && rect.contains(pos))
                .then_some(pos)
        });
    }

    output
}
