//! Upstream data-source clients.
//!
//! Both clients are thin blocking HTTP wrappers: they own transport and JSON
//! decoding and leave domain validation to the aggregation pass.

pub mod intensity;
pub mod openvolt;

pub use intensity::{CarbonIntensityClient, LONDON_REGION_ID};
pub use openvolt::OpenVoltClient;
