pub mod family;
pub mod interface;
pub mod target;
