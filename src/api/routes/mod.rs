pub mod filters;
pub mod legends;
pub mod lineups;
pub mod standings;
pub mod teams;
