//! Headless editing session for one internal of one node.
//!
//! A UI front end calls [`InternalEditor::prepare_frame`] once per frame,
//! renders the returned [`FramePlan`], forwards user input to the `set_*` /
//! `pick_*` / `request_selection` methods, and drains [`InternalEditor::take_events`]
//! after the frame is laid out.

use std::sync::Arc;

use log::{debug, error, warn};
use uuid::Uuid;

use crate::descriptor::{AttributeDescriptorRegistry, ValueDescriptorRegistry};
use crate::editor::dispatch::{EditorKind, dispatch};
use crate::editor::selection::SelectionRequest;
use crate::model::{AttributeInternalValue, Internal, InternalValue, NodeDataType, NodeSize};
use crate::query::LookupDispatcher;
use crate::resolver::{AssetAttributeResolver, ResolverContext, ResolverEffect};
use crate::service::FlowDocument;
use crate::settings::PickerSettings;

/// Notifications for the host, delivered after the frame that caused them.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// A value was committed to the internal.
    Picked,
    /// The node's first socket was retyped from a resolved attribute.
    SocketTypeChanged(NodeDataType),
}

/// Shared, read-mostly collaborators of every editor.
#[derive(Clone)]
pub struct EditorServices {
    pub settings: Arc<PickerSettings>,
    pub value_types: Arc<ValueDescriptorRegistry>,
    pub attribute_descriptors: Arc<AttributeDescriptorRegistry>,
}

impl Default for EditorServices {
    fn default() -> Self {
        Self {
            settings: Arc::new(PickerSettings::default()),
            value_types: Arc::new(ValueDescriptorRegistry::with_builtins()),
            attribute_descriptors: Arc::new(AttributeDescriptorRegistry::new()),
        }
    }
}

/// Everything needed to draw the internal this frame.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub kind: EditorKind,
    pub internal: Internal,
    pub node_size: Option<NodeSize>,
}

pub struct InternalEditor {
    node_id: Uuid,
    internal_index: usize,
    document: Arc<dyn FlowDocument>,
    lookups: Box<dyn LookupDispatcher>,
    services: EditorServices,
    resolver: AssetAttributeResolver,
    events: Vec<EditorEvent>,
    observed_size: Option<(f32, f32)>,
}

impl InternalEditor {
    pub fn new(
        node_id: Uuid,
        internal_index: usize,
        document: Arc<dyn FlowDocument>,
        lookups: Box<dyn LookupDispatcher>,
        services: EditorServices,
    ) -> Self {
        Self {
            node_id,
            internal_index,
            document,
            lookups,
            services,
            resolver: AssetAttributeResolver::new(),
            events: Vec::new(),
            observed_size: None,
        }
    }

    pub fn node_id(&self) -> Uuid {
        self.node_id
    }

    pub fn internal_index(&self) -> usize {
        self.internal_index
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.services.settings
    }

    pub fn resolver(&self) -> &AssetAttributeResolver {
        &self.resolver
    }

    pub fn internal(&self) -> Option<Internal> {
        match self.document.internal(self.node_id, self.internal_index) {
            Ok(internal) => Some(internal),
            Err(e) => {
                error!("Internal editor cannot read its slot: {}", e);
                None
            }
        }
    }

    /// Applies finished lookups, picks the editor for the internal's picker
    /// type and, for asset attributes that already carry a value, starts the
    /// one-time attribute load of this mount.
    pub fn prepare_frame(&mut self) -> Option<FramePlan> {
        self.poll_lookups();

        let internal = self.internal()?;
        let kind = dispatch(&internal.picker.picker_type);

        if kind == EditorKind::AssetAttribute
            && !internal.value.is_empty()
            && !self.resolver.is_initialized()
            && !self.resolver.is_loading()
        {
            match internal.value.as_attribute() {
                Some(value) => {
                    let request = self.resolver.load_attributes(&value.asset_id);
                    self.lookups.dispatch(request);
                }
                None => warn!(
                    "Internal '{}' has an asset attribute picker but a {:?} value",
                    internal.name, internal.value
                ),
            }
        }

        let node_size = self.document.node_size(self.node_id).unwrap_or_else(|e| {
            error!("Internal editor cannot read node size: {}", e);
            None
        });

        Some(FramePlan {
            kind,
            internal,
            node_size,
        })
    }

    /// Applies every lookup that finished since the last call. Returns whether
    /// any response was received.
    pub fn poll_lookups(&mut self) -> bool {
        let responses = self.lookups.poll();
        let received = !responses.is_empty();
        for response in responses {
            let current: Option<AttributeInternalValue> = self
                .internal()
                .and_then(|internal| internal.value.as_attribute().cloned());
            let ctx = ResolverContext {
                meta_keys: &self.services.settings.meta_keys,
                attribute_descriptors: &self.services.attribute_descriptors,
                value_types: &self.services.value_types,
            };
            let effects = self.resolver.apply(response, current.as_ref(), &ctx);
            for effect in effects {
                self.apply_effect(effect);
            }
        }
        received
    }

    pub fn has_pending_lookups(&self) -> bool {
        self.lookups.has_pending()
    }

    fn apply_effect(&mut self, effect: ResolverEffect) {
        match effect {
            // Resolver defaults raise no `Picked`
            ResolverEffect::WriteValue(value) => {
                self.write_value(value);
            }
            ResolverEffect::SetSocketType(data_type) => {
                match self.document.set_first_socket_type(self.node_id, data_type) {
                    Ok(true) => self.events.push(EditorEvent::SocketTypeChanged(data_type)),
                    Ok(false) => debug!("Node {} has no socket to retype", self.node_id),
                    Err(e) => error!("Failed to set socket type on node {}: {}", self.node_id, e),
                }
            }
        }
    }

    /// Value sink: stores `value` in the internal and queues [`EditorEvent::Picked`].
    pub fn set_value(&mut self, value: InternalValue) {
        if self.write_value(value) {
            self.events.push(EditorEvent::Picked);
        }
    }

    fn write_value(&self, value: InternalValue) -> bool {
        match self
            .document
            .set_internal_value(self.node_id, self.internal_index, value)
        {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to set internal {} of node {}: {}",
                    self.internal_index, self.node_id, e
                );
                false
            }
        }
    }

    /// Number editor input; unparsable text is stored as NaN.
    pub fn set_number_text(&mut self, text: &str) {
        self.set_value(InternalValue::parse_number(text));
    }

    /// First pointer press on the editor: record an undo point before any edit lands.
    pub fn on_pointer_down(&self) {
        self.document.create_undo_snapshot();
        self.document.notify_change();
    }

    /// Container content size changed. Writes the padded size to the node and
    /// returns `true`, or returns `false` when the size is unchanged.
    pub fn on_resize(&mut self, width: f32, height: f32) -> bool {
        if self.observed_size == Some((width, height)) {
            return false;
        }
        self.observed_size = Some((width, height));

        let padding = self.services.settings.layout_padding;
        let size = NodeSize {
            x: width - padding,
            y: height - padding,
        };
        if let Err(e) = self.document.set_node_size(self.node_id, size) {
            error!("Failed to store size of node {}: {}", self.node_id, e);
        }
        true
    }

    /// Selection surface commit. Anything but exactly one entity is refused and
    /// leaves the editor untouched; the surface should stay open then.
    pub fn request_selection(&mut self, request: &SelectionRequest) -> bool {
        let Some(entity) = request.single() else {
            debug!(
                "Rejecting asset selection of {} entities",
                request.entities.len()
            );
            return false;
        };
        let (value, lookup) = self.resolver.select_asset(&entity.asset_id);
        self.set_value(InternalValue::AssetAttribute(value));
        self.lookups.dispatch(lookup);
        true
    }

    /// Explicit attribute choice from the selector.
    pub fn pick_attribute(&mut self, attribute_name: &str) -> bool {
        let Some((value, lookup)) = self.resolver.pick_attribute(attribute_name) else {
            return false;
        };
        self.set_value(InternalValue::AssetAttribute(value));
        // Socket stays ANY until the value type lookup answers.
        self.apply_effect(ResolverEffect::SetSocketType(NodeDataType::Any));
        self.lookups.dispatch(lookup);
        true
    }

    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }
}
