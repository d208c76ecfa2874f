//! The internal picker widget.

use egui::{Context, Id, Rect, RichText, Ui};
use flow_library::editor::{EditorEvent, InternalEditor};

use crate::modal::Modal;
use crate::state::PickerState;
use crate::surface::AssetSelectionSurface;
use crate::theme::PickerTheme;
use crate::variants::{PickerAction, VariantContext, render_variant};

/// What one frame of the picker produced.
pub struct PickerResponse {
    pub rect: Rect,
    /// Committed edits and socket retypes, in order.
    pub events: Vec<EditorEvent>,
    /// A right click landed on the picker; the host should not open its own menu.
    pub consumed_secondary_click: bool,
    /// The wheel scrolled the picker's control instead of the canvas.
    pub wheel_captured: bool,
}

pub struct InternalPicker {
    editor: InternalEditor,
    surface: Box<dyn AssetSelectionSurface>,
    theme: PickerTheme,
    state: PickerState,
}

impl InternalPicker {
    pub fn new(editor: InternalEditor, surface: Box<dyn AssetSelectionSurface>) -> Self {
        Self {
            editor,
            surface,
            theme: PickerTheme::default(),
            state: PickerState::default(),
        }
    }

    pub fn with_theme(mut self, theme: PickerTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn editor(&self) -> &InternalEditor {
        &self.editor
    }

    pub fn is_modal_open(&self) -> bool {
        self.state.modal_open
    }

    pub fn show(&mut self, ui: &mut Ui) -> PickerResponse {
        let id = ui.id().with((
            "internal_picker",
            self.editor.node_id(),
            self.editor.internal_index(),
        ));

        let Some(plan) = self.editor.prepare_frame() else {
            let response = ui.label(
                RichText::new(&self.editor.settings().labels.unimplemented_picker)
                    .color(self.theme.placeholder_color),
            );
            return PickerResponse {
                rect: response.rect,
                events: self.editor.take_events(),
                consumed_secondary_click: false,
                wheel_captured: false,
            };
        };

        // Container rect: content plus half the layout padding on each side
        let margin = (self.editor.settings().layout_padding / 2.0).round() as i8;
        let inner = egui::Frame::NONE
            .inner_margin(egui::Margin::same(margin))
            .show(ui, |ui| {
                let ctx = VariantContext {
                    id,
                    theme: &self.theme,
                    labels: &self.editor.settings().labels,
                    resolver: self.editor.resolver(),
                };
                render_variant(ui, &plan, &ctx, &mut self.state)
            });
        let rect = inner.response.rect;
        let output = inner.inner;

        // Undo point before any edit of this frame lands
        let pressed = ui.input(|i| {
            i.pointer.any_pressed() && i.pointer.press_origin().is_some_and(|p| rect.contains(p))
        });
        if pressed {
            self.editor.on_pointer_down();
        }

        let consumed_secondary_click = ui.input(|i| {
            i.pointer.button_clicked(egui::PointerButton::Secondary)
                && i.pointer.interact_pos().is_some_and(|p| rect.contains(p))
        });

        for action in output.actions {
            self.apply(action);
        }
        self.show_modal(ui.ctx(), id);

        self.editor.on_resize(rect.width(), rect.height());

        if self.editor.has_pending_lookups() {
            ui.ctx().request_repaint();
        }

        PickerResponse {
            rect,
            events: self.editor.take_events(),
            consumed_secondary_click,
            wheel_captured: output.wheel_captured,
        }
    }

    fn apply(&mut self, action: PickerAction) {
        match action {
            PickerAction::SetValue(value) => self.editor.set_value(value),
            PickerAction::SetNumberText(text) => self.editor.set_number_text(&text),
            PickerAction::OpenAssetModal => self.state.modal_open = true,
            PickerAction::PickAttribute(name) => {
                if !self.editor.pick_attribute(&name) {
                    log::warn!("Attribute '{}' could not be picked", name);
                }
            }
        }
    }

    fn show_modal(&mut self, ctx: &Context, id: Id) {
        if !self.state.modal_open {
            return;
        }

        let labels = self.editor.settings().labels.clone();
        let surface = &mut self.surface;
        let request = Modal::new(&labels.assets_header)
            .id(id.with("assets"))
            .fixed_size(self.theme.modal_size)
            .resizable(false)
            .open(&mut self.state.modal_open)
            .show(ctx, |ui| surface.show(ui, &labels))
            .and_then(|response| response.inner)
            .flatten();

        if let Some(request) = request {
            // Rejected requests keep the modal open for another try
            if self.editor.request_selection(&request) {
                self.state.modal_open = false;
                self.surface.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::AssetListSurface;
    use egui_kittest::Harness;
    use egui_kittest::kittest::Queryable;
    use flow_library::editor::EditorServices;
    use flow_library::model::{
        Asset, AssetAttribute, AttributeInternalValue, FlowNode, FlowProject, Internal,
        InternalValue, NodeDataType, NodeSize, NodeSocket, Picker, PickerType,
    };
    use flow_library::query::{ImmediateLookup, InMemoryAssetService};
    use flow_library::service::{FlowDocument, ProjectService};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;
    use uuid::Uuid;

    fn assets() -> Vec<Asset> {
        vec![
            Asset::new("pump-7", "Pump 7", "PumpAsset")
                .with_attribute(
                    AssetAttribute::new("flowRate", "positiveNumber").with_meta("ruleState", true),
                )
                .with_attribute(
                    AssetAttribute::new("running", "boolean").with_meta("agentLink", true),
                ),
            Asset::new("light-1", "Hall light", "LightAsset")
                .with_attribute(AssetAttribute::new("notes", "text")),
        ]
    }

    /// Helper: a picker for a single internal on a fresh node.
    fn picker_for(internal: Internal) -> (Arc<ProjectService>, Uuid, Rc<RefCell<InternalPicker>>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut project = FlowProject::new("test");
        let node_id = project.add_node(
            FlowNode::new("node")
                .with_internal(internal)
                .with_output(NodeSocket::new("out", NodeDataType::Any)),
        );
        let service = Arc::new(ProjectService::new(project));
        let asset_service = Arc::new(InMemoryAssetService::with_assets(assets()));
        let surface = AssetListSurface::from_summaries(asset_service.summaries());
        let editor = InternalEditor::new(
            node_id,
            0,
            service.clone(),
            Box::new(ImmediateLookup::new(asset_service)),
            EditorServices::default(),
        );
        let picker = InternalPicker::new(editor, Box::new(surface));
        (service, node_id, Rc::new(RefCell::new(picker)))
    }

    /// Helper: a harness drawing `picker` every frame and collecting its events.
    fn harness_for(
        picker: Rc<RefCell<InternalPicker>>,
    ) -> (Harness<'static>, Rc<RefCell<Vec<EditorEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let seen = events.clone();
        let harness = Harness::builder()
            .with_size(egui::vec2(600.0, 500.0))
            .build_ui(move |ui| {
                let response = picker.borrow_mut().show(ui);
                seen.borrow_mut().extend(response.events);
            });
        (harness, events)
    }

    fn value_of(service: &ProjectService, node_id: Uuid) -> InternalValue {
        service.internal(node_id, 0).unwrap().value
    }

    #[test]
    fn test_unknown_picker_shows_placeholder() {
        let (service, node_id, picker) = picker_for(
            Internal::new("range", Picker::new(PickerType::from_tag("TIME_RANGE")))
                .with_value(InternalValue::from("kept")),
        );
        let (harness, events) = harness_for(picker);
        assert!(harness.query_by_label("unimplemented picker").is_some());
        // プレースホルダーは値を変更しない
        assert!(events.borrow().is_empty());
        assert_eq!(value_of(&service, node_id), InternalValue::from("kept"));
    }

    #[test]
    fn test_double_dropdown_shows_placeholder() {
        let (_, _, picker) =
            picker_for(Internal::new("pair", Picker::new(PickerType::DoubleDropdown)));
        let (harness, _) = harness_for(picker);
        assert!(harness.query_by_label("unimplemented").is_some());
    }

    #[test]
    fn test_checkbox_click_commits_value() {
        let (service, node_id, picker) =
            picker_for(Internal::new("enabled", Picker::new(PickerType::Checkbox)));
        let (mut harness, events) = harness_for(picker);

        harness.get_by_label("enabled").click();
        harness.run();

        assert_eq!(value_of(&service, node_id), InternalValue::Boolean(true));
        assert!(events.borrow().contains(&EditorEvent::Picked));
    }

    #[test]
    fn test_select_asset_button_opens_modal() {
        let (_, _, picker) =
            picker_for(Internal::new("source", Picker::new(PickerType::AssetAttribute)));
        let (mut harness, _) = harness_for(picker.clone());

        assert!(harness.query_by_label("Assets").is_none());
        harness.get_by_label("Select asset").click();
        harness.run();

        assert!(picker.borrow().is_modal_open());
        assert!(harness.query_by_label("Assets").is_some());
        assert!(harness.query_by_label("Pump 7").is_some());
        assert!(harness.query_by_label("Hall light").is_some());
    }

    #[test]
    fn test_multi_selection_keeps_modal_open() {
        let (service, node_id, picker) =
            picker_for(Internal::new("source", Picker::new(PickerType::AssetAttribute)));
        let (mut harness, events) = harness_for(picker.clone());

        harness.get_by_label("Select asset").click();
        harness.run();
        harness.get_by_label("Pump 7").click();
        harness.run();
        harness.get_by_label("Hall light").click();
        harness.run();
        harness.get_by_label("Select").click();
        harness.run();

        // 複数選択は拒否され、モーダルは開いたまま
        assert!(picker.borrow().is_modal_open());
        assert_eq!(value_of(&service, node_id), InternalValue::Empty);
        assert!(events.borrow().is_empty());

        harness.get_by_label("Hall light").click();
        harness.run();
        harness.get_by_label("Select").click();
        harness.run();

        assert!(!picker.borrow().is_modal_open());
        assert_eq!(
            value_of(&service, node_id),
            InternalValue::AssetAttribute(AttributeInternalValue::bound("pump-7", "flowRate"))
        );
        // ボタンには選択したアセット名が表示される
        assert!(harness.query_by_label("Pump 7").is_some());
    }

    #[test]
    fn test_asset_without_eligible_attributes_shows_message() {
        let (service, node_id, picker) = picker_for(
            Internal::new("source", Picker::new(PickerType::AssetAttribute)).with_value(
                InternalValue::AssetAttribute(AttributeInternalValue::provisional("light-1")),
            ),
        );
        let (mut harness, events) = harness_for(picker);
        harness.run();

        assert!(harness.query_by_label("No rule state attributes").is_some());
        assert!(harness.query_by_label("Hall light").is_some());
        assert!(events.borrow().is_empty());
        assert_eq!(
            value_of(&service, node_id),
            InternalValue::AssetAttribute(AttributeInternalValue::provisional("light-1"))
        );
    }

    #[test]
    fn test_missing_asset_offers_reselection() {
        let (_, _, picker) = picker_for(
            Internal::new("source", Picker::new(PickerType::AssetAttribute)).with_value(
                InternalValue::AssetAttribute(AttributeInternalValue::provisional("X")),
            ),
        );
        let (mut harness, _) = harness_for(picker.clone());
        harness.run();

        assert!(picker.borrow().editor().resolver().is_initialized());
        assert!(harness.query_by_label("Select asset").is_some());
    }

    #[test]
    fn test_layout_writes_padded_node_size() {
        let (service, node_id, picker) =
            picker_for(Internal::new("label", Picker::new(PickerType::Text)));
        let last_rect = Rc::new(RefCell::new(None));
        let seen = last_rect.clone();
        let mut harness = Harness::builder()
            .with_size(egui::vec2(600.0, 500.0))
            .build_ui(move |ui| {
                *seen.borrow_mut() = Some(picker.borrow_mut().show(ui).rect);
            });
        harness.run();

        let rect = last_rect.borrow().unwrap();
        let size = service.node(node_id).unwrap().size.unwrap();
        assert_eq!(size.x, rect.width() - 20.0);
        assert_eq!(size.y, rect.height() - 20.0);
    }

    #[test]
    fn test_checkbox_click_records_undo_point_first() {
        let (service, node_id, picker) =
            picker_for(Internal::new("enabled", Picker::new(PickerType::Checkbox)));
        let (mut harness, _) = harness_for(picker);

        harness.get_by_label("enabled").click();
        harness.run();
        assert_eq!(value_of(&service, node_id), InternalValue::Boolean(true));

        // 押下時のスナップショットはクリック前の値
        assert!(service.undo().unwrap());
        assert_eq!(value_of(&service, node_id), InternalValue::Empty);
    }

    #[test]
    fn test_press_on_first_frame_records_undo_point() {
        let internal = || Internal::new("enabled", Picker::new(PickerType::Checkbox));

        // 同じレイアウトのピッカーで矩形を測る
        let (_, _, measured) = picker_for(internal());
        let measured_rect = Rc::new(RefCell::new(None));
        let seen = measured_rect.clone();
        let mut harness = Harness::builder()
            .with_size(egui::vec2(600.0, 500.0))
            .build_ui(move |ui| {
                *seen.borrow_mut() = Some(measured.borrow_mut().show(ui).rect);
            });
        harness.run();
        let rect: Rect = measured_rect.borrow().unwrap();

        let (service, _, picker) = picker_for(internal());
        let visible = Rc::new(Cell::new(false));
        let shown = visible.clone();
        let mut harness = Harness::builder()
            .with_size(egui::vec2(600.0, 500.0))
            .build_ui(move |ui| {
                if shown.get() {
                    picker.borrow_mut().show(ui);
                }
            });
        harness.run();
        assert!(!service.can_undo());

        // 初めて表示されるフレームで押下する
        visible.set(true);
        let pos = rect.center();
        harness.input_mut().events.push(egui::Event::PointerMoved(pos));
        harness.input_mut().events.push(egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        });
        harness.step();

        assert!(service.can_undo());
    }

    #[test]
    fn test_multiline_follows_node_size_hint() {
        let (service, node_id, picker) =
            picker_for(Internal::new("message", Picker::new(PickerType::Multiline)));
        service
            .set_node_size(node_id, NodeSize { x: 200.0, y: 90.0 })
            .unwrap();

        let last_rect = Rc::new(RefCell::new(None));
        let seen = last_rect.clone();
        let mut harness = Harness::builder()
            .with_size(egui::vec2(600.0, 500.0))
            .build_ui(move |ui| {
                *seen.borrow_mut() = Some(picker.borrow_mut().show(ui).rect);
            });
        harness.run();

        let rect: Rect = last_rect.borrow().unwrap();
        assert!((rect.width() - 220.0).abs() < 1.0, "width {}", rect.width());
        assert!((rect.height() - 110.0).abs() < 1.0, "height {}", rect.height());
        // サイズヒントはそのまま安定する
        let size = service.node(node_id).unwrap().size.unwrap();
        assert!((size.x - 200.0).abs() < 1.0);
        assert!((size.y - 90.0).abs() < 1.0);
    }
}
