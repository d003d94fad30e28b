pub mod catalog;

pub use catalog::{Governorate, GovernorateCode, GovernorateName, RegionCatalog};
