pub mod basic;
pub mod flat;
pub mod surface;
