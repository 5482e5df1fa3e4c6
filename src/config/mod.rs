pub mod raw;
pub mod resolved;
pub mod resolver;
