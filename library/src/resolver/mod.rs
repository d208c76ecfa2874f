pub mod asset_attribute;
pub mod eligibility;

pub use asset_attribute::{
    AssetAttributeResolver, AttributeNameEntry, ResolverContext, ResolverEffect, ResolverState,
};
pub use eligibility::{is_eligible, is_eligible_attribute, is_truthy};
