//! Algorithm implementations for the pathway model
//!
//! This module contains the calculation pipeline, the service receipt
//! allocator it calls once per sector, and the scenario orchestration on
//! top of both.

pub mod allocation;
pub mod pathway;
pub mod scenario;
