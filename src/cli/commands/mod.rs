pub mod balance;
pub mod consolidate;
pub mod quote;
pub mod swap;
