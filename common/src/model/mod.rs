//! Domain models for the bond depository

pub mod network;
pub mod token;
pub mod market;
pub mod bond;
