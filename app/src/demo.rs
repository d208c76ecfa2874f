//! Sample project and assets the app starts with.

use flow_library::descriptor::{AttributeDescriptor, AttributeDescriptorRegistry};
use flow_library::model::{
    Asset, AssetAttribute, AttributeInternalValue, Color, FlowNode, FlowProject, Internal,
    InternalValue, NodeDataType, NodeSocket, Picker, PickerOption, PickerType,
};

pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset::new("thermostat-1", "Living room thermostat", "ThermostatAsset")
            .with_attribute(
                AssetAttribute::new("temperature", "number").with_meta("ruleState", true),
            )
            .with_attribute(
                AssetAttribute::new("targetTemperature", "number").with_meta("ruleState", true),
            )
            .with_attribute(AssetAttribute::new("online", "boolean").with_meta("agentLink", true))
            .with_attribute(AssetAttribute::new("notes", "text")),
        Asset::new("light-1", "Hall light", "LightAsset")
            .with_attribute(AssetAttribute::new("colour", "colourRGB").with_meta("ruleState", true))
            .with_attribute(
                AssetAttribute::new("brightness", "positiveInteger").with_meta("ruleState", 1),
            ),
        Asset::new("building-1", "Office building", "BuildingAsset")
            .with_attribute(AssetAttribute::new("street", "text").with_meta("ruleState", false)),
    ]
}

pub fn attribute_descriptors() -> AttributeDescriptorRegistry {
    let mut registry = AttributeDescriptorRegistry::new();
    registry.register(
        None,
        AttributeDescriptor::new("temperature").with_units("°C"),
    );
    registry.register(
        Some("ThermostatAsset"),
        AttributeDescriptor::new("targetTemperature")
            .with_label("Setpoint")
            .with_units("°C"),
    );
    registry.register(None, AttributeDescriptor::new("brightness").with_units("%"));
    registry
}

pub fn sample_project() -> FlowProject {
    let mut project = FlowProject::new("Demo rules");

    project.add_node(
        FlowNode::new("Read attribute")
            .with_internal(
                Internal::new("attribute", Picker::new(PickerType::AssetAttribute)).with_value(
                    InternalValue::AssetAttribute(AttributeInternalValue::bound(
                        "thermostat-1",
                        "temperature",
                    )),
                ),
            )
            .with_output(NodeSocket::new("value", NodeDataType::Number)),
    );
    project.add_node(
        FlowNode::new("Write attribute")
            .with_internal(Internal::new(
                "attribute",
                Picker::new(PickerType::AssetAttribute),
            ))
            .with_input(NodeSocket::new("value", NodeDataType::Any)),
    );
    project.add_node(
        FlowNode::new("Number")
            .with_internal(
                Internal::new("value", Picker::new(PickerType::Number))
                    .with_value(InternalValue::number(21.5)),
            )
            .with_output(NodeSocket::new("value", NodeDataType::Number)),
    );
    project.add_node(
        FlowNode::new("Text")
            .with_internal(Internal::new("text", Picker::new(PickerType::Text)))
            .with_output(NodeSocket::new("text", NodeDataType::String)),
    );
    project.add_node(
        FlowNode::new("Log message")
            .with_internal(Internal::new("message", Picker::new(PickerType::Multiline)))
            .with_internal(
                Internal::new("enabled", Picker::new(PickerType::Checkbox))
                    .with_value(InternalValue::from(true)),
            )
            .with_input(NodeSocket::new("trigger", NodeDataType::Trigger)),
    );
    project.add_node(
        FlowNode::new("Compare")
            .with_internal(Internal::new(
                "operator",
                Picker::dropdown(vec![
                    PickerOption::new("equals", "=="),
                    PickerOption::new("greater than", ">"),
                    PickerOption::new("less than", "<"),
                ]),
            ))
            .with_output(NodeSocket::new("result", NodeDataType::Boolean)),
    );
    project.add_node(
        FlowNode::new("Colour")
            .with_internal(
                Internal::new("colour", Picker::new(PickerType::Color))
                    .with_value(InternalValue::from(Color::rgba(255, 160, 0, 255))),
            )
            .with_output(NodeSocket::new("colour", NodeDataType::Color)),
    );
    project.add_node(
        FlowNode::new("Lookup table")
            .with_internal(Internal::new(
                "pair",
                Picker::new(PickerType::DoubleDropdown),
            ))
            .with_internal(Internal::new(
                "window",
                Picker::new(PickerType::from_tag("TIME_RANGE")),
            )),
    );

    project
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_library::resolver::is_eligible_attribute;
    use flow_library::settings::MetaKeys;

    #[test]
    fn every_demo_asset_id_is_unique() {
        let assets = sample_assets();
        let mut ids: Vec<_> = assets.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), assets.len());
    }

    #[test]
    fn office_building_has_no_eligible_attributes() {
        let keys = MetaKeys::default();
        let building = sample_assets().into_iter().nth(2).unwrap();
        let attributes = building.attributes.unwrap();
        assert!(attributes.values().all(|a| !is_eligible_attribute(a, &keys)));
    }

    #[test]
    fn setpoint_label_is_asset_type_specific() {
        let registry = attribute_descriptors();
        assert_eq!(
            registry.label("targetTemperature", "ThermostatAsset"),
            "Setpoint (°C)"
        );
        assert_eq!(registry.label("temperature", "AnyAsset"), "Temperature (°C)");
    }
}
