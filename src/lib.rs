pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    academic_background_service::AcademicBackgroundService,
    application_service::ApplicationService, authorization::AuthorizationService,
    employment_background_service::EmploymentBackgroundService,
    job_offer_service::JobOfferService, user_service::UserService,
};
use sqlx::PgPool;

pub use routes::router;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub users: UserService,
    pub job_offers: JobOfferService,
    pub applications: ApplicationService,
    pub academic_backgrounds: AcademicBackgroundService,
    pub employment_backgrounds: EmploymentBackgroundService,
    pub authorization: AuthorizationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserService::new(pool.clone()),
            job_offers: JobOfferService::new(pool.clone()),
            applications: ApplicationService::new(pool.clone()),
            academic_backgrounds: AcademicBackgroundService::new(pool.clone()),
            employment_backgrounds: EmploymentBackgroundService::new(pool.clone()),
            authorization: AuthorizationService::new(pool.clone()),
            pool,
        }
    }
}
