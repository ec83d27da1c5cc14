pub mod aggregate;
pub mod movement;
