pub mod deploy;
pub mod env;
pub mod plan;
pub mod validate;
