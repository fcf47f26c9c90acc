pub mod export;
pub mod hit;
