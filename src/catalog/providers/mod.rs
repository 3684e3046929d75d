//! Broadcaster-specific catalog providers

pub mod francetv;

pub use francetv::FranceTv;
