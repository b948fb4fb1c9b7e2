pub mod emission;
pub mod pool;
pub mod position;
