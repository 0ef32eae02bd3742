//! Test fixtures for route-planner.
//!
//! Provides a realistic delivery network around Las Vegas / Henderson:
//! a distribution centre, three hubs, delivery addresses, and the road
//! segments between them with distance, drive time, and cost.

pub mod las_vegas_network;

pub use las_vegas_network::*;
