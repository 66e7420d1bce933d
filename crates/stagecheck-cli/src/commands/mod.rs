pub mod audit;
pub mod extract;
