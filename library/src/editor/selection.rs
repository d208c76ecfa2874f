/// An entity offered by the asset selection surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedEntity {
    pub asset_id: String,
    pub name: String,
}

impl SelectedEntity {
    pub fn new(asset_id: &str, name: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            name: name.to_string(),
        }
    }
}

/// What the selection surface asks to commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub entities: Vec<SelectedEntity>,
}

impl SelectionRequest {
    pub fn new(entities: Vec<SelectedEntity>) -> Self {
        Self { entities }
    }

    /// The chosen entity, if exactly one was chosen.
    pub fn single(&self) -> Option<&SelectedEntity> {
        match self.entities.as_slice() {
            [entity] => Some(entity),
            _ => None,
        }
    }
}
