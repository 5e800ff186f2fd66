mod controller_flow;
mod forest_properties;
mod shared_store;
mod store_scenarios;
mod support;
