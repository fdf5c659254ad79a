//! Wiring of the network services over one shared store

pub mod network_manager;
pub mod resolve;

pub use network_manager::NetworkManager;
