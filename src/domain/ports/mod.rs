pub mod driver_store;
