pub mod application_dto;
pub mod background_dto;
pub mod job_offer_dto;
pub mod message_dto;
pub mod user_dto;
