pub mod academic_background_service;
pub mod application_service;
pub mod authorization;
pub mod employment_background_service;
pub mod job_offer_service;
pub mod user_service;
