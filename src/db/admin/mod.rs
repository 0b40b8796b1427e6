pub mod menu;
pub mod workers;
