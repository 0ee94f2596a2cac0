pub mod edit;
pub mod filter;
pub mod selection;
pub mod store;
