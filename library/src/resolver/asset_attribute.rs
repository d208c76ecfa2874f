//! Selection state of one ASSET_ATTRIBUTE internal.
//!
//! The resolver never talks to the query service or the document itself. It
//! hands out [`LookupRequest`]s, consumes the matching [`LookupResponse`]s and
//! reports what should change in the document as [`ResolverEffect`]s.
//!
//! Every request carries an epoch. Choosing another asset or another attribute
//! supersedes the previous lookup of that kind, and a response whose epoch is
//! no longer the current one is dropped.

use log::{debug, error, warn};

use crate::descriptor::{AttributeDescriptorRegistry, ValueDescriptorRegistry, socket_type_for};
use crate::error::LibraryError;
use crate::model::{Asset, AttributeInternalValue, InternalValue, NodeDataType};
use crate::query::{AssetQuery, LookupKind, LookupRequest, LookupResponse, LookupTicket};
use crate::resolver::eligibility::is_eligible_attribute;
use crate::settings::MetaKeys;

/// An eligible attribute of the selected asset, as offered in the attribute selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeNameEntry {
    pub name: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolverState {
    Unselected,
    Loading { asset_id: String },
    /// The last attribute lookup found no asset. A new selection is needed.
    AssetMissing { asset_id: String },
    AttributesLoaded,
    ValueBound { attribute_name: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolverEffect {
    /// Store this value in the internal through the value sink.
    WriteValue(InternalValue),
    /// Retype the node's first socket.
    SetSocketType(NodeDataType),
}

/// Registries the resolver consults while applying responses.
pub struct ResolverContext<'a> {
    pub meta_keys: &'a MetaKeys,
    pub attribute_descriptors: &'a AttributeDescriptorRegistry,
    pub value_types: &'a ValueDescriptorRegistry,
}

pub struct AssetAttributeResolver {
    state: ResolverState,
    selected_asset: Option<Asset>,
    attribute_names: Vec<AttributeNameEntry>,
    selected_attribute: Option<String>,
    initialized: bool,
    next_epoch: u64,
    attributes_epoch: Option<u64>,
    value_type_epoch: Option<u64>,
}

impl Default for AssetAttributeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetAttributeResolver {
    pub fn new() -> Self {
        Self {
            state: ResolverState::Unselected,
            selected_asset: None,
            attribute_names: Vec::new(),
            selected_attribute: None,
            initialized: false,
            next_epoch: 1,
            attributes_epoch: None,
            value_type_epoch: None,
        }
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    pub fn selected_asset(&self) -> Option<&Asset> {
        self.selected_asset.as_ref()
    }

    pub fn attribute_names(&self) -> &[AttributeNameEntry] {
        &self.attribute_names
    }

    pub fn selected_attribute(&self) -> Option<&str> {
        self.selected_attribute.as_deref()
    }

    /// Set once an attribute lookup has completed, whether or not the asset existed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_loading(&self) -> bool {
        self.attributes_epoch.is_some()
    }

    pub fn is_resolving_type(&self) -> bool {
        self.value_type_epoch.is_some()
    }

    fn next_ticket(&mut self, asset_id: &str, kind: LookupKind) -> LookupTicket {
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        LookupTicket {
            epoch,
            asset_id: asset_id.to_string(),
            kind,
        }
    }

    /// Starts (or restarts) loading the attributes of `asset_id`. Any lookup
    /// still in flight for a previous selection becomes stale.
    pub fn load_attributes(&mut self, asset_id: &str) -> LookupRequest {
        let ticket = self.next_ticket(asset_id, LookupKind::Attributes);
        self.attributes_epoch = Some(ticket.epoch);
        self.value_type_epoch = None;
        self.selected_asset = None;
        self.attribute_names.clear();
        self.selected_attribute = None;
        self.state = ResolverState::Loading {
            asset_id: asset_id.to_string(),
        };
        debug!("Loading attributes of asset {} (epoch {})", asset_id, ticket.epoch);
        LookupRequest {
            query: AssetQuery::attributes_of(asset_id),
            ticket,
        }
    }

    /// A new asset was chosen: returns the provisional value to store and the
    /// attribute lookup to run.
    pub fn select_asset(&mut self, asset_id: &str) -> (AttributeInternalValue, LookupRequest) {
        let request = self.load_attributes(asset_id);
        (AttributeInternalValue::provisional(asset_id), request)
    }

    /// The user picked one of the offered attributes. Returns the value to
    /// store and the lookup resolving the attribute's value type, or `None` when
    /// no asset is loaded or `attribute_name` is not among the eligible ones.
    pub fn pick_attribute(
        &mut self,
        attribute_name: &str,
    ) -> Option<(AttributeInternalValue, LookupRequest)> {
        let asset_id = self.selected_asset.as_ref()?.id.clone();
        if !self.attribute_names.iter().any(|e| e.name == attribute_name) {
            warn!(
                "Attribute '{}' is not an eligible attribute of asset {}",
                attribute_name, asset_id
            );
            return None;
        }

        let ticket = self.next_ticket(
            &asset_id,
            LookupKind::ValueType {
                attribute_name: attribute_name.to_string(),
            },
        );
        self.value_type_epoch = Some(ticket.epoch);
        self.selected_attribute = Some(attribute_name.to_string());
        self.state = ResolverState::ValueBound {
            attribute_name: attribute_name.to_string(),
        };

        let request = LookupRequest {
            query: AssetQuery::single_attribute(&asset_id, attribute_name),
            ticket,
        };
        Some((AttributeInternalValue::bound(&asset_id, attribute_name), request))
    }

    /// Applies a finished lookup. `current` is the internal's value at the time
    /// the response is applied.
    pub fn apply(
        &mut self,
        response: LookupResponse,
        current: Option<&AttributeInternalValue>,
        ctx: &ResolverContext,
    ) -> Vec<ResolverEffect> {
        match response.ticket.kind.clone() {
            LookupKind::Attributes => self.apply_attributes(response, current, ctx),
            LookupKind::ValueType { attribute_name } => {
                self.apply_value_type(response, &attribute_name, ctx)
            }
        }
    }

    fn apply_attributes(
        &mut self,
        response: LookupResponse,
        current: Option<&AttributeInternalValue>,
        ctx: &ResolverContext,
    ) -> Vec<ResolverEffect> {
        let LookupResponse { ticket, result } = response;
        if self.attributes_epoch != Some(ticket.epoch) {
            debug!(
                "Ignoring stale attribute lookup for asset {} (epoch {})",
                ticket.asset_id, ticket.epoch
            );
            return Vec::new();
        }
        self.attributes_epoch = None;
        self.initialized = true;

        let asset = match first_record(result, &ticket.asset_id) {
            Some(asset) => asset,
            None => {
                warn!("Asset with id {} is missing", ticket.asset_id);
                self.state = ResolverState::AssetMissing {
                    asset_id: ticket.asset_id,
                };
                return Vec::new();
            }
        };

        self.attribute_names = eligible_entries(&asset, ctx);
        self.selected_asset = Some(asset);
        self.state = ResolverState::AttributesLoaded;

        let Some(first) = self.attribute_names.first().map(|e| e.name.clone()) else {
            debug!("Asset {} has no rule state attributes", ticket.asset_id);
            return Vec::new();
        };

        let existing = current
            .filter(|v| v.asset_id == ticket.asset_id)
            .and_then(|v| v.attribute_name.as_deref());
        match existing {
            Some(name) if self.attribute_names.iter().any(|e| e.name == name) => {
                self.selected_attribute = Some(name.to_string());
                Vec::new()
            }
            Some(name) => {
                warn!(
                    "Stored attribute '{}' is not eligible on asset {}; leaving it unselected",
                    name, ticket.asset_id
                );
                self.selected_attribute = None;
                Vec::new()
            }
            None => {
                self.selected_attribute = Some(first.clone());
                vec![ResolverEffect::WriteValue(InternalValue::AssetAttribute(
                    AttributeInternalValue::bound(&ticket.asset_id, &first),
                ))]
            }
        }
    }

    fn apply_value_type(
        &mut self,
        response: LookupResponse,
        attribute_name: &str,
        ctx: &ResolverContext,
    ) -> Vec<ResolverEffect> {
        let LookupResponse { ticket, result } = response;
        if self.value_type_epoch != Some(ticket.epoch) {
            debug!(
                "Ignoring stale value type lookup for {}.{} (epoch {})",
                ticket.asset_id, attribute_name, ticket.epoch
            );
            return Vec::new();
        }
        self.value_type_epoch = None;

        let data_type = resolve_socket_type(result, &ticket.asset_id, attribute_name, ctx.value_types);
        vec![ResolverEffect::SetSocketType(data_type)]
    }
}

fn first_record(result: Result<Vec<Asset>, LibraryError>, asset_id: &str) -> Option<Asset> {
    match result {
        Ok(assets) => assets.into_iter().next(),
        Err(e) => {
            error!("Lookup of asset {} failed: {}", asset_id, e);
            None
        }
    }
}

fn eligible_entries(asset: &Asset, ctx: &ResolverContext) -> Vec<AttributeNameEntry> {
    let Some(attributes) = &asset.attributes else {
        return Vec::new();
    };
    attributes
        .values()
        .filter(|attribute| is_eligible_attribute(attribute, ctx.meta_keys))
        .map(|attribute| AttributeNameEntry {
            name: attribute.name.clone(),
            label: ctx
                .attribute_descriptors
                .label(&attribute.name, &asset.asset_type),
        })
        .collect()
}

/// Socket type for `attribute_name` on the looked-up asset, `Any` whenever a
/// piece is missing.
fn resolve_socket_type(
    result: Result<Vec<Asset>, LibraryError>,
    asset_id: &str,
    attribute_name: &str,
    value_types: &ValueDescriptorRegistry,
) -> NodeDataType {
    let Some(asset) = first_record(result, asset_id) else {
        warn!("Asset {} is missing; socket type falls back to ANY", asset_id);
        return NodeDataType::Any;
    };
    let Some(attribute) = asset.attribute(attribute_name) else {
        warn!(
            "Asset {} has no attribute '{}'; socket type falls back to ANY",
            asset_id, attribute_name
        );
        return NodeDataType::Any;
    };
    match value_types.find(&attribute.value_type) {
        Some(descriptor) => socket_type_for(descriptor),
        None => {
            warn!(
                "No value descriptor for type '{}' of {}.{}; socket type falls back to ANY",
                attribute.value_type, asset_id, attribute_name
            );
            NodeDataType::Any
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetAttribute;
    use serde_json::json;

    struct Fixture {
        keys: MetaKeys,
        labels: AttributeDescriptorRegistry,
        types: ValueDescriptorRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                keys: MetaKeys::default(),
                labels: AttributeDescriptorRegistry::new(),
                types: ValueDescriptorRegistry::with_builtins(),
            }
        }

        fn ctx(&self) -> ResolverContext<'_> {
            ResolverContext {
                meta_keys: &self.keys,
                attribute_descriptors: &self.labels,
                value_types: &self.types,
            }
        }
    }

    fn thermostat() -> Asset {
        Asset::new("T1", "Thermostat", "ThermostatAsset")
            .with_attribute(AssetAttribute::new("notes", "text"))
            .with_attribute(AssetAttribute::new("a", "number").with_meta("ruleState", true))
            .with_attribute(AssetAttribute::new("b", "boolean").with_meta("agentLink", json!({})))
            .with_attribute(AssetAttribute::new("c", "mystery").with_meta("ruleState", true))
    }

    fn respond(request: &LookupRequest, assets: Vec<Asset>) -> LookupResponse {
        LookupResponse {
            ticket: request.ticket.clone(),
            result: Ok(assets),
        }
    }

    #[test]
    fn first_eligible_attribute_becomes_the_default() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let (provisional, request) = resolver.select_asset("T1");
        assert_eq!(provisional.attribute_name, None);
        assert!(resolver.is_loading());

        let effects = resolver.apply(respond(&request, vec![thermostat()]), Some(&provisional), &fx.ctx());

        let names: Vec<_> = resolver.attribute_names().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(
            effects,
            vec![ResolverEffect::WriteValue(InternalValue::AssetAttribute(
                AttributeInternalValue::bound("T1", "a")
            ))]
        );
        assert_eq!(resolver.selected_attribute(), Some("a"));
        assert!(resolver.is_initialized());
        assert_eq!(resolver.state(), &ResolverState::AttributesLoaded);
    }

    #[test]
    fn reload_with_eligible_name_is_idempotent() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let current = AttributeInternalValue::bound("T1", "b");
        for _ in 0..2 {
            let request = resolver.load_attributes("T1");
            let effects = resolver.apply(respond(&request, vec![thermostat()]), Some(&current), &fx.ctx());
            assert!(effects.is_empty());
            assert_eq!(resolver.selected_attribute(), Some("b"));
        }
    }

    #[test]
    fn ineligible_existing_name_is_kept_unselected() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let current = AttributeInternalValue::bound("T1", "notes");
        let request = resolver.load_attributes("T1");
        let effects = resolver.apply(respond(&request, vec![thermostat()]), Some(&current), &fx.ctx());
        // 保存済みの名前は書き換えない
        assert!(effects.is_empty());
        assert_eq!(resolver.selected_attribute(), None);
        assert_eq!(resolver.attribute_names().len(), 3);
    }

    #[test]
    fn missing_asset_completes_initialization_without_attributes() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let request = resolver.load_attributes("X");
        let effects = resolver.apply(respond(&request, vec![]), None, &fx.ctx());
        assert!(effects.is_empty());
        assert!(resolver.attribute_names().is_empty());
        assert!(resolver.is_initialized());
        assert!(!resolver.is_loading());
        assert_eq!(
            resolver.state(),
            &ResolverState::AssetMissing {
                asset_id: "X".to_string()
            }
        );
    }

    #[test]
    fn query_error_is_treated_as_missing_asset() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let request = resolver.load_attributes("T1");
        let response = LookupResponse {
            ticket: request.ticket.clone(),
            result: Err(LibraryError::Query("connection refused".to_string())),
        };
        assert!(resolver.apply(response, None, &fx.ctx()).is_empty());
        assert!(matches!(resolver.state(), ResolverState::AssetMissing { .. }));
    }

    #[test]
    fn asset_without_eligible_attributes_offers_nothing() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let plain = Asset::new("P", "Plain", "ThingAsset")
            .with_attribute(AssetAttribute::new("notes", "text").with_meta("ruleState", false));
        let request = resolver.load_attributes("P");
        let effects = resolver.apply(respond(&request, vec![plain]), None, &fx.ctx());
        assert!(effects.is_empty());
        assert!(resolver.attribute_names().is_empty());
        assert!(resolver.selected_asset().is_some());
        assert_eq!(resolver.selected_attribute(), None);
    }

    #[test]
    fn stale_attribute_response_is_ignored() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let (_, first) = resolver.select_asset("T1");
        let (_, second) = resolver.select_asset("P");

        let plain = Asset::new("P", "Plain", "ThingAsset");
        assert!(resolver.apply(respond(&first, vec![thermostat()]), None, &fx.ctx()).is_empty());
        assert!(resolver.is_loading());
        assert!(resolver.attribute_names().is_empty());

        resolver.apply(respond(&second, vec![plain]), None, &fx.ctx());
        assert_eq!(resolver.selected_asset().unwrap().id, "P");
    }

    #[test]
    fn picking_resolves_socket_type() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let (provisional, request) = resolver.select_asset("T1");
        resolver.apply(respond(&request, vec![thermostat()]), Some(&provisional), &fx.ctx());

        let (value, type_request) = resolver.pick_attribute("b").unwrap();
        assert_eq!(value, AttributeInternalValue::bound("T1", "b"));
        assert_eq!(
            type_request.query.select.attributes,
            Some(vec!["b".to_string()])
        );
        let effects = resolver.apply(respond(&type_request, vec![thermostat()]), Some(&value), &fx.ctx());
        assert_eq!(effects, vec![ResolverEffect::SetSocketType(NodeDataType::Boolean)]);
        assert_eq!(
            resolver.state(),
            &ResolverState::ValueBound {
                attribute_name: "b".to_string()
            }
        );
    }

    #[test]
    fn unknown_value_type_falls_back_to_any() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let request = resolver.load_attributes("T1");
        resolver.apply(respond(&request, vec![thermostat()]), None, &fx.ctx());

        let (_, type_request) = resolver.pick_attribute("c").unwrap();
        let effects = resolver.apply(respond(&type_request, vec![thermostat()]), None, &fx.ctx());
        assert_eq!(effects, vec![ResolverEffect::SetSocketType(NodeDataType::Any)]);
    }

    #[test]
    fn missing_type_record_falls_back_to_any() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let request = resolver.load_attributes("T1");
        resolver.apply(respond(&request, vec![thermostat()]), None, &fx.ctx());

        let (_, type_request) = resolver.pick_attribute("a").unwrap();
        let effects = resolver.apply(respond(&type_request, vec![]), None, &fx.ctx());
        assert_eq!(effects, vec![ResolverEffect::SetSocketType(NodeDataType::Any)]);
    }

    #[test]
    fn superseded_pick_is_ignored() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        let request = resolver.load_attributes("T1");
        resolver.apply(respond(&request, vec![thermostat()]), None, &fx.ctx());

        let (_, first) = resolver.pick_attribute("a").unwrap();
        let (_, second) = resolver.pick_attribute("b").unwrap();
        assert!(resolver.apply(respond(&first, vec![thermostat()]), None, &fx.ctx()).is_empty());
        assert_eq!(
            resolver.apply(respond(&second, vec![thermostat()]), None, &fx.ctx()),
            vec![ResolverEffect::SetSocketType(NodeDataType::Boolean)]
        );
    }

    #[test]
    fn ineligible_pick_is_refused() {
        let fx = Fixture::new();
        let mut resolver = AssetAttributeResolver::new();
        assert!(resolver.pick_attribute("a").is_none());

        let request = resolver.load_attributes("T1");
        resolver.apply(respond(&request, vec![thermostat()]), None, &fx.ctx());
        assert!(resolver.pick_attribute("notes").is_none());
    }
}
