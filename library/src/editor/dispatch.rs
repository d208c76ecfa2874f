use crate::model::PickerType;

/// The control rendered for an internal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Text,
    Multiline,
    Number,
    Checkbox,
    Dropdown,
    Color,
    /// Declared picker type without an editor; rendered as a placeholder.
    DoubleDropdown,
    AssetAttribute,
    /// Picker type this build does not know.
    Unimplemented,
}

impl EditorKind {
    /// Whether the kind has an edit path into the value sink.
    pub fn is_editable(self) -> bool {
        !matches!(self, EditorKind::DoubleDropdown | EditorKind::Unimplemented)
    }
}

pub fn dispatch(picker_type: &PickerType) -> EditorKind {
    match picker_type {
        PickerType::AssetAttribute => EditorKind::AssetAttribute,
        PickerType::Color => EditorKind::Color,
        PickerType::DoubleDropdown => EditorKind::DoubleDropdown,
        PickerType::Checkbox => EditorKind::Checkbox,
        PickerType::Dropdown => EditorKind::Dropdown,
        PickerType::Multiline => EditorKind::Multiline,
        PickerType::Number => EditorKind::Number,
        PickerType::Text => EditorKind::Text,
        _ => EditorKind::Unimplemented,
    }
}
