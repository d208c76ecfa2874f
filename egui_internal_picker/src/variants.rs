//! One render function per editor kind. Renderers never touch the document;
//! they report what the user did as [`PickerAction`]s.

use egui::{Color32, RichText, TextEdit, Ui};
use flow_library::editor::scroll::{multiline_keeps_wheel, number_keeps_wheel};
use flow_library::editor::{EditorKind, FramePlan};
use flow_library::model::{Color, Internal, InternalValue, NodeSize, PickerOption};
use flow_library::resolver::AssetAttributeResolver;
use flow_library::settings::PickerLabels;

use crate::scroll::contain_wheel;
use crate::state::PickerState;
use crate::theme::PickerTheme;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction {
    SetValue(InternalValue),
    /// Raw text of the number field, parsed by the editor.
    SetNumberText(String),
    OpenAssetModal,
    PickAttribute(String),
}

pub struct VariantContext<'a> {
    pub id: egui::Id,
    pub theme: &'a PickerTheme,
    pub labels: &'a PickerLabels,
    pub resolver: &'a AssetAttributeResolver,
}

#[derive(Default)]
pub struct VariantOutput {
    pub actions: Vec<PickerAction>,
    /// The control kept this frame's wheel input.
    pub wheel_captured: bool,
}

pub fn render_variant(
    ui: &mut Ui,
    plan: &FramePlan,
    ctx: &VariantContext,
    state: &mut PickerState,
) -> VariantOutput {
    let mut out = VariantOutput::default();
    let internal = &plan.internal;

    match plan.kind {
        EditorKind::Text => render_text(ui, internal, ctx, &mut out),
        EditorKind::Multiline => render_multiline(ui, internal, plan.node_size, ctx, &mut out),
        EditorKind::Number => render_number(ui, internal, ctx, state, &mut out),
        EditorKind::Checkbox => {
            let mut checked = internal.value.as_bool().unwrap_or(false);
            if ui.checkbox(&mut checked, &internal.name).changed() {
                out.actions
                    .push(PickerAction::SetValue(InternalValue::Boolean(checked)));
            }
        }
        EditorKind::Dropdown => render_dropdown(ui, internal, ctx, &mut out),
        EditorKind::Color => render_color(ui, internal, &mut out),
        EditorKind::DoubleDropdown => {
            ui.label(RichText::new(&ctx.labels.unimplemented).color(ctx.theme.placeholder_color));
        }
        EditorKind::AssetAttribute => render_asset_attribute(ui, internal, ctx, &mut out),
        EditorKind::Unimplemented => {
            ui.label(
                RichText::new(&ctx.labels.unimplemented_picker).color(ctx.theme.placeholder_color),
            )
            .on_hover_text(internal.picker.picker_type.tag());
        }
    }

    out
}

fn render_text(ui: &mut Ui, internal: &Internal, ctx: &VariantContext, out: &mut VariantOutput) {
    let mut text = internal.value.as_text().unwrap_or_default().to_string();
    let response = ui.add(
        TextEdit::singleline(&mut text)
            .hint_text(&internal.name)
            .desired_width(ctx.theme.field_width),
    );
    if response.changed() {
        out.actions.push(PickerAction::SetValue(InternalValue::Text(text)));
    }
}

fn render_multiline(
    ui: &mut Ui,
    internal: &Internal,
    node_size: Option<NodeSize>,
    ctx: &VariantContext,
    out: &mut VariantOutput,
) {
    let mut text = internal.value.as_text().unwrap_or_default().to_string();
    // The node's size hint wins over the theme and is filled exactly
    let (width, height, fill) = match node_size {
        Some(size) => (size.x.max(0.0), size.y.max(0.0), true),
        None => (ctx.theme.field_width, ctx.theme.multiline_max_height, false),
    };
    let scroll = ui
        .allocate_ui(egui::vec2(width, height), |ui| {
            egui::ScrollArea::vertical()
                .id_salt(ctx.id.with("multiline"))
                .max_height(height)
                .auto_shrink([!fill, !fill])
                .show(ui, |ui| {
                    ui.add(
                        TextEdit::multiline(&mut text)
                            .hint_text(&internal.name)
                            .desired_rows(ctx.theme.multiline_rows)
                            .desired_width(if fill { f32::INFINITY } else { width }),
                    )
                })
        })
        .inner;

    if scroll.inner.changed() {
        out.actions.push(PickerAction::SetValue(InternalValue::Text(text)));
    }

    let keep = multiline_keeps_wheel(scroll.inner_rect.height(), scroll.content_size.y);
    let hovered = ui.rect_contains_pointer(scroll.inner_rect);
    out.wheel_captured |= contain_wheel(ui, hovered, keep);
}

fn render_number(
    ui: &mut Ui,
    internal: &Internal,
    ctx: &VariantContext,
    state: &mut PickerState,
    out: &mut VariantOutput,
) {
    let value = internal.value.as_number().unwrap_or(0.0);
    let mut text = state
        .number_text
        .clone()
        .unwrap_or_else(|| value.to_string());
    let response = ui.add(
        TextEdit::singleline(&mut text)
            .hint_text(&internal.name)
            .desired_width(ctx.theme.field_width),
    );
    if response.changed() {
        out.actions.push(PickerAction::SetNumberText(text.clone()));
    }

    let focused = response.has_focus();
    state.number_text = if focused { Some(text) } else { None };
    out.wheel_captured |= contain_wheel(ui, response.hovered(), number_keeps_wheel(focused));
}

/// Text shown in the writable dropdown field for `value`.
fn option_display(value: Option<&serde_json::Value>, options: &[PickerOption]) -> String {
    match value {
        None => String::new(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => options
            .iter()
            .find(|o| &o.value == other)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| other.to_string()),
    }
}

fn render_dropdown(
    ui: &mut Ui,
    internal: &Internal,
    ctx: &VariantContext,
    out: &mut VariantOutput,
) {
    let current = internal.value.as_option().cloned();
    let mut text = option_display(current.as_ref(), &internal.picker.options);

    ui.horizontal(|ui| {
        let response = ui.add(
            TextEdit::singleline(&mut text)
                .hint_text(&internal.name)
                .desired_width(ctx.theme.field_width - 28.0),
        );
        if response.changed() {
            out.actions.push(PickerAction::SetValue(InternalValue::Option(
                serde_json::Value::String(text.clone()),
            )));
        }

        let mut selected = current.clone();
        egui::ComboBox::from_id_salt(ctx.id.with("options"))
            .selected_text("")
            .width(20.0)
            .show_ui(ui, |ui| {
                for option in &internal.picker.options {
                    ui.selectable_value(&mut selected, Some(option.value.clone()), &option.name);
                }
            });
        if selected != current {
            if let Some(value) = selected {
                out.actions
                    .push(PickerAction::SetValue(InternalValue::Option(value)));
            }
        }
    });
}

fn render_color(ui: &mut Ui, internal: &Internal, out: &mut VariantOutput) {
    let color = internal.value.as_color().unwrap_or_default();
    let mut color32 = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
    if ui.color_edit_button_srgba(&mut color32).changed() {
        let [r, g, b, a] = color32.to_srgba_unmultiplied();
        out.actions
            .push(PickerAction::SetValue(InternalValue::Color(Color::rgba(r, g, b, a))));
    }
}

fn render_asset_attribute(
    ui: &mut Ui,
    internal: &Internal,
    ctx: &VariantContext,
    out: &mut VariantOutput,
) {
    let resolver = ctx.resolver;
    ui.vertical(|ui| {
        let button_label = resolver
            .selected_asset()
            .map(|asset| asset.name.clone())
            .unwrap_or_else(|| ctx.labels.select_asset.clone());
        if ui
            .button(button_label)
            .on_hover_text(&internal.name)
            .clicked()
        {
            out.actions.push(PickerAction::OpenAssetModal);
        }

        if resolver.is_loading() {
            ui.spinner();
            return;
        }
        if resolver.selected_asset().is_none() {
            return;
        }

        let entries = resolver.attribute_names();
        if entries.is_empty() {
            ui.label(&ctx.labels.no_rule_state_attributes);
            return;
        }

        let current = resolver.selected_attribute().map(str::to_string);
        let selected_label = current
            .as_deref()
            .and_then(|name| entries.iter().find(|e| e.name == name))
            .map(|e| e.label.clone())
            .unwrap_or_default();

        let mut selected = current.clone();
        egui::ComboBox::from_id_salt(ctx.id.with("attribute"))
            .selected_text(selected_label)
            .width(ctx.theme.field_width)
            .show_ui(ui, |ui| {
                for entry in entries {
                    ui.selectable_value(&mut selected, Some(entry.name.clone()), &entry.label)
                        .on_hover_text(&entry.name);
                }
            });
        if selected != current {
            if let Some(name) = selected {
                out.actions.push(PickerAction::PickAttribute(name));
            }
        }
    });
}
