pub mod schema;
pub mod serve;
