pub mod generator;
pub mod save;
pub mod world;
