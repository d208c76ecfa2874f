pub mod asset_query;
pub mod lookup;
pub mod worker;

pub use asset_query::{AssetQuery, AssetQueryService, AssetSelect, InMemoryAssetService};
pub use lookup::{
    ImmediateLookup, LookupDispatcher, LookupKind, LookupRequest, LookupResponse, LookupTicket,
};
pub use worker::{LookupClient, LookupWorker, Waker};
