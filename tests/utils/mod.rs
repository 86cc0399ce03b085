pub mod fakes;
pub mod factories;
