pub mod application;
pub mod background;
pub mod job_offer;
pub mod user;
