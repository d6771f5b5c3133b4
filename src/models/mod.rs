pub mod direction;
pub mod vehicle;
