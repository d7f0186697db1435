//! Database models, schema and connection setup

pub mod init;
pub mod models;
pub mod schema;

pub use init::*;
pub use models::*;
pub use schema::*;
