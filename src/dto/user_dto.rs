use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::changeset::Changeset;
use crate::models::user::{Role, User};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "El campo 'nombre' es obligatorio"))]
    pub first_name: String,
    #[serde(rename = "apellido")]
    #[validate(length(min = 1, message = "El campo 'apellido' es obligatorio"))]
    pub last_name: String,
    #[validate(email(message = "El campo 'email' no es válido"))]
    pub email: String,
    #[serde(rename = "contraseña", alias = "password")]
    #[validate(length(min = 1, message = "El campo 'contraseña' es obligatorio"))]
    pub password: String,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "telefono")]
    #[validate(length(min = 1, message = "El campo 'telefono' es obligatorio"))]
    pub phone: String,
    #[serde(rename = "direccion")]
    #[validate(length(min = 1, message = "El campo 'direccion' es obligatorio"))]
    pub address: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

/// Full replacement; same required fields as creation.
pub type ReplaceUserPayload = CreateUserPayload;

/// Updatable user fields. Anything else in the body is rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserPayload {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "El campo 'nombre' no puede estar vacío"))]
    pub first_name: Option<String>,
    #[serde(rename = "apellido")]
    #[validate(length(min = 1, message = "El campo 'apellido' no puede estar vacío"))]
    pub last_name: Option<String>,
    #[validate(email(message = "El campo 'email' no es válido"))]
    pub email: Option<String>,
    #[serde(rename = "contraseña", alias = "password")]
    #[validate(length(min = 1, message = "El campo 'contraseña' no puede estar vacío"))]
    pub password: Option<String>,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "telefono")]
    #[validate(length(min = 1, message = "El campo 'telefono' no puede estar vacío"))]
    pub phone: Option<String>,
    #[serde(rename = "direccion")]
    #[validate(length(min = 1, message = "El campo 'direccion' no puede estar vacío"))]
    pub address: Option<String>,
    #[serde(rename = "rol")]
    pub role: Option<Role>,
}

impl UpdateUserPayload {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.birth_date.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.role.is_none()
    }

    /// Plain columns only; the password is hashed by the service before it
    /// joins the changeset.
    pub fn to_changeset(&self) -> Changeset {
        let mut changes = Changeset::new("users");
        changes
            .set_opt("first_name", self.first_name.clone())
            .set_opt("last_name", self.last_name.clone())
            .set_opt("email", self.email.clone())
            .set_opt("birth_date", self.birth_date)
            .set_opt("phone", self.phone.clone())
            .set_opt("address", self.address.clone())
            .set_opt("role", self.role.map(|r| r.as_str()));
        changes
    }
}

impl From<ReplaceUserPayload> for UpdateUserPayload {
    fn from(value: ReplaceUserPayload) -> Self {
        Self {
            first_name: Some(value.first_name),
            last_name: Some(value.last_name),
            email: Some(value.email),
            password: Some(value.password),
            birth_date: Some(value.birth_date),
            phone: Some(value.phone),
            address: Some(value.address),
            role: Some(value.role),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
    pub telefono: String,
    pub direccion: String,
    pub rol: String,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            nombre: value.first_name,
            apellido: value.last_name,
            email: value.email,
            fecha_nacimiento: value.birth_date,
            telefono: value.phone,
            direccion: value.address,
            rol: value.role,
            fecha_creacion: value.created_at,
        }
    }
}
