pub mod authorization;
pub mod identity;
