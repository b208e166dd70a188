pub mod builder;
pub mod dedup;
pub mod model;
pub mod signature;
