//! Registration form validation.
//!
//! The form collects every field any role might need; [`RegistrationForm::validate`]
//! checks it locally and narrows it to the [`RegisterRequest`] variant for
//! the chosen role, which carries only that role's fields.

use cronos_sdk::objects::{
    LogistikRegistration, RegisterCommon, RegisterRequest, ResidentRegistration, Role,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Password tidak sama")]
    PasswordMismatch,

    #[error("{0} wajib diisi")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
}

impl RegistrationForm {
    pub fn validate(self, role: Role) -> Result<RegisterRequest, RegistrationError> {
        let common = RegisterCommon {
            name: required("Nama", self.name)?,
            email: required("Email", self.email)?,
            password: self.password,
            phone: required("Nomor telepon", self.phone)?,
        };
        if common.password.is_empty() {
            return Err(RegistrationError::MissingField("Password"));
        }
        if common.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(match role {
            Role::Admin => RegisterRequest::Admin(common),
            Role::Petambak | Role::Konsumen => {
                let resident = ResidentRegistration {
                    common,
                    address: required("Alamat", self.address.unwrap_or_default())?,
                };
                if role == Role::Petambak {
                    RegisterRequest::Petambak(resident)
                } else {
                    RegisterRequest::Konsumen(resident)
                }
            }
            Role::Logistik => RegisterRequest::Logistik(LogistikRegistration {
                common,
                vehicle_type: required("Jenis kendaraan", self.vehicle_type.unwrap_or_default())?,
                license_plate: required("Plat nomor", self.license_plate.unwrap_or_default())?,
            }),
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistrationError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}
