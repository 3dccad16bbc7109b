//! Buildings, regions, growth and the persisted economy document.

pub mod building;
pub mod data;
pub mod growth;
pub mod region;

pub use building::Building;
pub use data::{EconomyData, CURRENT_SCHEMA_VERSION};
pub use growth::{GrowthCurve, GrowthModel};
pub use region::{BuildingGroup, RegionScope, RegionStore, TOTAL_REGION};
