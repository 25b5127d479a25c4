pub mod account_status;
pub mod confidence;
pub mod embedding;
pub mod similarity;
pub mod timestamp;
