pub mod driver_repo;
pub mod migrations;
