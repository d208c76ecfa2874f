//! Asset selection surfaces shown inside the picker's modal.

use flow_library::editor::{SelectedEntity, SelectionRequest};
use flow_library::settings::PickerLabels;

/// Content of the asset modal. Returns a request when the user commits a
/// selection; the picker closes the modal only if the request is accepted.
pub trait AssetSelectionSurface {
    fn show(&mut self, ui: &mut egui::Ui, labels: &PickerLabels) -> Option<SelectionRequest>;

    /// Called after a request was accepted.
    fn reset(&mut self) {}
}

/// Flat checkbox list of assets. Several can be ticked; the picker rejects
/// anything but exactly one.
pub struct AssetListSurface {
    entries: Vec<(SelectedEntity, bool)>,
}

impl AssetListSurface {
    pub fn new(assets: impl IntoIterator<Item = SelectedEntity>) -> Self {
        Self {
            entries: assets.into_iter().map(|e| (e, false)).collect(),
        }
    }

    /// From `(id, name)` pairs, e.g. `InMemoryAssetService::summaries`.
    pub fn from_summaries(summaries: Vec<(String, String)>) -> Self {
        Self::new(
            summaries
                .into_iter()
                .map(|(id, name)| SelectedEntity::new(&id, &name)),
        )
    }

    fn checked(&self) -> Vec<SelectedEntity> {
        self.entries
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(entity, _)| entity.clone())
            .collect()
    }
}

impl AssetSelectionSurface for AssetListSurface {
    fn show(&mut self, ui: &mut egui::Ui, labels: &PickerLabels) -> Option<SelectionRequest> {
        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 32.0).max(48.0))
            .show(ui, |ui| {
                for (entity, checked) in &mut self.entries {
                    ui.checkbox(checked, &entity.name).on_hover_text(&entity.asset_id);
                }
            });
        ui.separator();
        if ui.button(&labels.confirm_selection).clicked() {
            return Some(SelectionRequest::new(self.checked()));
        }
        None
    }

    fn reset(&mut self) {
        for (_, checked) in &mut self.entries {
            *checked = false;
        }
    }
}
