pub mod duration;
pub mod quote;
