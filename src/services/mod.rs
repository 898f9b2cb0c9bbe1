pub mod transport;
pub mod weather;
