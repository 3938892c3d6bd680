pub mod attrition;
pub mod dataset;
