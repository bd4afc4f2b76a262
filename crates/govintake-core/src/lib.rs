//! Core of GovIntake: request types, the merged request list, status ordering,
//! table queries and lifecycle cost rollups. Everything here is pure and
//! synchronous.

pub mod compare;
pub mod cost;
mod error;
pub mod normalize;
pub mod request;
pub mod status;
pub mod table;
pub mod wire;

pub use compare::{compare_status, compare_status_directed, status_sort_key};
pub use cost::{CostRollup, LifecycleCosts, decode_lifecycle_costs, rollup};
pub use error::IntakeError;
pub use normalize::{RawRequests, merge_requests};
pub use request::{IntakeRequest, MergedRequest, Process, SystemRef, TrbRequest};
pub use status::{AdminStatus, GovernanceStatusView, RequesterStatus, TrbStatus, Viewer};
pub use table::{Column, SortDirection, SortSpec, TablePage, TableQuery, run_query};
pub use wire::{IntakeRecord, TrbRecord, decode_intakes, decode_trb_requests};
