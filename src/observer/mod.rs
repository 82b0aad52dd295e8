// Publish/subscribe plumbing: observers receive state snapshots from a Subject

pub mod error;
pub mod implementations;
pub mod subject;
pub mod traits;

// Re-export core types
pub use error::*;
pub use implementations::*;
pub use subject::*;
pub use traits::*;
