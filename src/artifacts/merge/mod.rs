pub mod engine;
pub mod split_point;
