//! Child profile models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A child whose stored weight drives dose calculations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildProfile {
    /// Local UUID
    pub id: String,
    /// Child name
    pub name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Weight in kg
    pub weight_kg: f64,
}

impl ChildProfile {
    /// Create a validated child profile.
    pub fn new(name: String, birth_date: NaiveDate, weight_kg: f64) -> Result<Self, ValidationError> {
        let name = validate_fields(&name, weight_kg)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            birth_date,
            weight_kg,
        })
    }

    /// Overwrite the editable fields, keeping the identity.
    pub fn update(
        &mut self,
        name: String,
        birth_date: NaiveDate,
        weight_kg: f64,
    ) -> Result<(), ValidationError> {
        self.name = validate_fields(&name, weight_kg)?;
        self.birth_date = birth_date;
        self.weight_kg = weight_kg;
        Ok(())
    }
}

/// Parse a birth date in `YYYY-MM-DD` form.
pub fn parse_birth_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidBirthDate(text.to_string()))
}

fn validate_fields(name: &str, weight_kg: f64) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyChildName);
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ValidationError::InvalidChildWeight);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 14).unwrap()
    }

    #[test]
    fn test_new_child() {
        let child = ChildProfile::new(" Ola ".into(), birth_date(), 12.5).unwrap();
        assert_eq!(child.name, "Ola");
        assert_eq!(child.weight_kg, 12.5);
        assert_eq!(child.id.len(), 36);
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert_eq!(
            ChildProfile::new("  ".into(), birth_date(), 12.5),
            Err(ValidationError::EmptyChildName)
        );
        assert_eq!(
            ChildProfile::new("Ola".into(), birth_date(), 0.0),
            Err(ValidationError::InvalidChildWeight)
        );
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut child = ChildProfile::new("Ola".into(), birth_date(), 12.5).unwrap();
        let id = child.id.clone();

        child.update("Aleksandra".into(), birth_date(), 13.0).unwrap();
        assert_eq!(child.id, id);
        assert_eq!(child.name, "Aleksandra");
        assert_eq!(child.weight_kg, 13.0);

        // Failed update leaves the profile untouched
        assert!(child.update("Ola".into(), birth_date(), -1.0).is_err());
        assert_eq!(child.name, "Aleksandra");
        assert_eq!(child.weight_kg, 13.0);
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("2021-03-14").unwrap(), birth_date());
        assert!(matches!(
            parse_birth_date("14.03.2021"),
            Err(ValidationError::InvalidBirthDate(_))
        ));
    }
}
