//! Lookup requests/responses exchanged between an editor and whatever runs its queries.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::LibraryError;
use crate::model::Asset;
use crate::query::asset_query::{AssetQuery, AssetQueryService};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupKind {
    /// Full attribute list of the selected asset.
    Attributes,
    /// One attribute, fetched to resolve its value type.
    ValueType { attribute_name: String },
}

/// Identifies a lookup so its response can be matched against the selection
/// that was current when it was issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    pub epoch: u64,
    pub asset_id: String,
    pub kind: LookupKind,
}

#[derive(Clone, Debug)]
pub struct LookupRequest {
    pub ticket: LookupTicket,
    pub query: AssetQuery,
}

#[derive(Debug)]
pub struct LookupResponse {
    pub ticket: LookupTicket,
    pub result: Result<Vec<Asset>, LibraryError>,
}

/// Transport for an editor's lookups. `dispatch` must not block; finished
/// lookups are collected with `poll` on the editor's thread.
pub trait LookupDispatcher {
    fn dispatch(&mut self, request: LookupRequest);

    fn poll(&mut self) -> Vec<LookupResponse>;

    /// Whether any dispatched lookup has not been returned by `poll` yet.
    fn has_pending(&self) -> bool;
}

/// Runs each query synchronously inside `dispatch` and hands the response out
/// on the next `poll`.
pub struct ImmediateLookup {
    service: Arc<dyn AssetQueryService>,
    ready: VecDeque<LookupResponse>,
}

impl ImmediateLookup {
    pub fn new(service: Arc<dyn AssetQueryService>) -> Self {
        Self {
            service,
            ready: VecDeque::new(),
        }
    }
}

impl LookupDispatcher for ImmediateLookup {
    fn dispatch(&mut self, request: LookupRequest) {
        let result = self.service.query_assets(&request.query);
        self.ready.push_back(LookupResponse {
            ticket: request.ticket,
            result,
        });
    }

    fn poll(&mut self) -> Vec<LookupResponse> {
        self.ready.drain(..).collect()
    }

    fn has_pending(&self) -> bool {
        !self.ready.is_empty()
    }
}
