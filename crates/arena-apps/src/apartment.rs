//! Apartment listing app (scenario distractor)

use crate::app::App;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "ApartmentApp";

/// One apartment listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub apartment_id: String,
    pub name: String,
    pub location: String,
    pub zip_code: String,
    pub price: f64,
    pub number_of_bedrooms: u32,
    pub number_of_bathrooms: u32,
    pub square_footage: u32,
    pub property_type: String,
}

/// In-memory apartment listing app
#[derive(Debug, Default)]
pub struct ApartmentApp {
    apartments: IndexMap<String, Apartment>,
}

impl ApartmentApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listing and return its generated id
    #[allow(clippy::too_many_arguments)]
    pub fn add_new_apartment(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
        zip_code: impl Into<String>,
        price: f64,
        number_of_bedrooms: u32,
        number_of_bathrooms: u32,
        square_footage: u32,
        property_type: impl Into<String>,
    ) -> String {
        let apartment_id = Uuid::new_v4().simple().to_string();
        self.apartments.insert(
            apartment_id.clone(),
            Apartment {
                apartment_id: apartment_id.clone(),
                name: name.into(),
                location: location.into(),
                zip_code: zip_code.into(),
                price,
                number_of_bedrooms,
                number_of_bathrooms,
                square_footage,
                property_type: property_type.into(),
            },
        );
        apartment_id
    }

    /// Get a listing by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_apartment(&self, apartment_id: &str) -> Result<Apartment, AppError> {
        self.apartments
            .get(apartment_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, apartment_id))
    }

    /// Delete a listing by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_apartment(&mut self, apartment_id: &str) -> Result<String, AppError> {
        self.apartments
            .shift_remove(apartment_id)
            .map(|a| a.apartment_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, apartment_id))
    }

    /// All listings in insertion order
    #[must_use]
    pub fn list_apartments(&self) -> Vec<Apartment> {
        self.apartments.values().cloned().collect()
    }
}

impl App for ApartmentApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.apartments.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.apartments).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_delete() {
        let mut app = ApartmentApp::new();
        let id = app.add_new_apartment(
            "Luxury Downtown Apartment",
            "San Francisco, CA",
            "94102",
            3500.0,
            2,
            1,
            1200,
            "Apartment",
        );

        assert_eq!(app.get_apartment(&id).unwrap().number_of_bedrooms, 2);
        assert_eq!(app.list_apartments().len(), 1);

        app.delete_apartment(&id).unwrap();
        assert!(app.get_apartment(&id).is_err());
    }
}
