// Metapackage for the end-to-end tests under tests/
// Re-export the workspace crates as modules

pub use api_gateway;
pub use bond_engine;
pub use common;
