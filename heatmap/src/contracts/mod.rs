pub mod fetch_activity;
