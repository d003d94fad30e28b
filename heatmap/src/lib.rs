pub mod classifier;
pub mod config;
pub mod contracts;
pub mod data_transfer;
pub mod detail_panel;
pub mod join;
pub mod selection;
pub mod view;

pub use contracts::fetch_activity::{ActivityFetcher, FetchActivityError};
pub use view::HeatmapView;
