pub mod ahsp;
pub mod location;
pub mod priced;
pub mod pricing;
pub mod work_item;

pub use ahsp::{AhspBreakdown, AhspComponent, AhspMaster, Resource, ResourceCategory};
pub use location::LocationFactor;
pub use priced::PricedNode;
pub use pricing::{BuildingClass, EstimateValue, EstimateValues, PriceOverrides, PricingContext};
pub use work_item::{WorkItem, FIXED_ROOT_CODES};
