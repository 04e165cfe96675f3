pub mod investment;
pub mod mortgage;
pub mod scoring;
