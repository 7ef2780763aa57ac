pub mod games;
pub mod loader;
