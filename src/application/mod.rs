pub mod drivers;
pub mod identify;
pub mod matcher;
