pub mod config;
pub mod distance;
pub mod heading;
pub mod replay;
