pub mod arrangement;
pub mod boolean;
pub mod loop_finder;
pub mod query;
