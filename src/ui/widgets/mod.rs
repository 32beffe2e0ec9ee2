pub mod pie;
pub mod palette;
