//! Employee departure analytics: categorization, summary statistics and
//! rule-driven insights and recommendations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
