// ============================================================================
// Structure : Registration
// ============================================================================
// Formulaire d'inscription et sa validation côté client
//
// CONCEPTS RUST :
// 1. thiserror : une erreur typée par règle, l'UI affiche le message
// 2. Regex compilée une seule fois avec OnceLock
// ============================================================================

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Règle de validation non respectée
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("please fill in all required fields")]
    MissingField,

    #[error("enter a valid e-mail address")]
    InvalidEmail,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("phone number must look like 05xx xxx xxxx")]
    InvalidPhone,

    #[error("national id must be exactly 11 characters")]
    InvalidNationalId,
}

/// Longueur minimale du mot de passe
pub const MIN_PASSWORD_LEN: usize = 6;

/// Formulaire d'inscription, sérialisé tel que l'attend `/api/kullanici/kayit`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registration {
    #[serde(rename = "isim")]
    pub name: String,

    #[serde(rename = "soyisim")]
    pub surname: String,

    pub email: String,

    #[serde(rename = "parola")]
    pub password: String,

    #[serde(rename = "telefon_no")]
    pub phone: String,

    #[serde(rename = "kimlik_no")]
    pub national_id: Option<String>,

    #[serde(rename = "adres")]
    pub address: Option<String>,
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^05\d{9}$").expect("valid phone regex"))
}

impl Registration {
    /// Vérifie les règles dans l'ordre du formulaire
    ///
    /// Les champs optionnels vides sont normalisés en `None` avant l'envoi.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let required = [
            &self.name,
            &self.surname,
            &self.email,
            &self.password,
            &self.phone,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(RegistrationError::MissingField);
        }

        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(RegistrationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        if !phone_regex().is_match(&self.phone) {
            return Err(RegistrationError::InvalidPhone);
        }

        if let Some(id) = self.national_id.as_deref().filter(|id| !id.is_empty()) {
            if id.chars().count() != 11 {
                return Err(RegistrationError::InvalidNationalId);
            }
        }

        Ok(())
    }

    /// Remplace les champs optionnels vides par `None`
    pub fn normalized(mut self) -> Self {
        self.national_id = self.national_id.filter(|s| !s.trim().is_empty());
        self.address = self.address.filter(|s| !s.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Registration {
        Registration {
            name: "Ayşe".to_string(),
            surname: "Yılmaz".to_string(),
            email: "ayse@example.com".to_string(),
            password: "secret1".to_string(),
            phone: "05321234567".to_string(),
            national_id: None,
            address: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_missing_field() {
        let mut form = valid();
        form.surname = "  ".to_string();
        assert_eq!(form.validate(), Err(RegistrationError::MissingField));
    }

    #[test]
    fn test_invalid_email() {
        let mut form = valid();
        form.email = "ayse-at-example".to_string();
        assert_eq!(form.validate(), Err(RegistrationError::InvalidEmail));
    }

    #[test]
    fn test_short_password() {
        let mut form = valid();
        form.password = "12345".to_string();
        assert_eq!(
            form.validate(),
            Err(RegistrationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_phone_format() {
        let mut form = valid();
        form.phone = "5321234567".to_string();
        assert_eq!(form.validate(), Err(RegistrationError::InvalidPhone));

        form.phone = "053212345678".to_string();
        assert_eq!(form.validate(), Err(RegistrationError::InvalidPhone));
    }

    #[test]
    fn test_national_id_length() {
        let mut form = valid();
        form.national_id = Some("1234".to_string());
        assert_eq!(form.validate(), Err(RegistrationError::InvalidNationalId));

        form.national_id = Some("12345678901".to_string());
        assert_eq!(form.validate(), Ok(()));

        // Vide = non renseigné
        form.national_id = Some(String::new());
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_normalized_wire_format() {
        let mut form = valid();
        form.address = Some("   ".to_string());

        let json = serde_json::to_value(form.normalized()).unwrap();
        assert_eq!(json["telefon_no"], "05321234567");
        assert!(json["adres"].is_null());
        assert!(json["kimlik_no"].is_null());
    }
}
