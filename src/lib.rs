pub mod math;
pub mod hit_objects;
pub mod judgements;
pub mod config;
pub mod processor;
