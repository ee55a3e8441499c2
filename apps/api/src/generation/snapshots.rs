//! Boundary schemas for the generation endpoint.
//!
//! The `data` payload is validated against an explicit per-source-kind schema
//! before it reaches the prompt builder. Unknown extra fields are ignored so
//! callers can post a whole listing record as-is.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::content::SourceType;
use crate::models::listing::VehicleCondition;

/// The property fields the prompt builder serializes. Optional fields that are
/// absent are left out of the prompt entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub square_feet: f64,
    pub property_type: String,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub features: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSnapshot {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub price: f64,
    pub condition: VehicleCondition,
    pub mileage: f64,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SourceSnapshot {
    Property(PropertySnapshot),
    Vehicle(VehicleSnapshot),
}

/// Parses the raw `data` payload against the schema for its source kind.
pub fn parse_snapshot(source_type: SourceType, data: Value) -> Result<SourceSnapshot, AppError> {
    match source_type {
        SourceType::Property => serde_json::from_value::<PropertySnapshot>(data)
            .map(SourceSnapshot::Property)
            .map_err(|e| AppError::Validation(format!("invalid property data: {e}"))),
        SourceType::Vehicle => serde_json::from_value::<VehicleSnapshot>(data)
            .map(SourceSnapshot::Vehicle)
            .map_err(|e| AppError::Validation(format!("invalid vehicle data: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn miami_condo() -> Value {
        json!({
            "address": "1 Ocean Dr",
            "city": "Miami",
            "state": "FL",
            "zipCode": "33139",
            "price": 950000,
            "propertyType": "condo",
            "bedrooms": 2,
            "bathrooms": 2,
            "squareFeet": 1400,
            "features": ["Ocean View"]
        })
    }

    #[test]
    fn test_property_snapshot_parses() {
        let snapshot = parse_snapshot(SourceType::Property, miami_condo()).unwrap();
        match snapshot {
            SourceSnapshot::Property(p) => {
                assert_eq!(p.address, "1 Ocean Dr");
                assert_eq!(p.zip_code, "33139");
                assert_eq!(p.price, 950000.0);
                assert!(p.year_built.is_none());
            }
            SourceSnapshot::Vehicle(_) => panic!("expected property snapshot"),
        }
    }

    #[test]
    fn test_missing_required_field_is_a_validation_error() {
        let mut data = miami_condo();
        data.as_object_mut().unwrap().remove("price");
        let result = parse_snapshot(SourceType::Property, data);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut data = miami_condo();
        data.as_object_mut()
            .unwrap()
            .insert("status".to_string(), json!("active"));
        data.as_object_mut()
            .unwrap()
            .insert("imageUrls".to_string(), json!(["https://example.com/1.jpg"]));
        assert!(parse_snapshot(SourceType::Property, data).is_ok());
    }

    #[test]
    fn test_vehicle_snapshot_parses() {
        let data = json!({
            "year": 2022,
            "make": "Toyota",
            "model": "Tacoma",
            "trim": "TRD Off-Road",
            "price": 41500,
            "condition": "certified",
            "mileage": 18250,
            "color": "Army Green",
            "features": ["Crawl Control", "Tow Package"]
        });
        let snapshot = parse_snapshot(SourceType::Vehicle, data).unwrap();
        match snapshot {
            SourceSnapshot::Vehicle(v) => {
                assert_eq!(v.make, "Toyota");
                assert_eq!(v.condition, VehicleCondition::Certified);
                assert!(v.transmission.is_none());
            }
            SourceSnapshot::Property(_) => panic!("expected vehicle snapshot"),
        }
    }

    #[test]
    fn test_invalid_condition_is_a_validation_error() {
        let data = json!({
            "year": 2022,
            "make": "Toyota",
            "model": "Tacoma",
            "price": 41500,
            "condition": "like_new",
            "mileage": 18250
        });
        assert!(matches!(
            parse_snapshot(SourceType::Vehicle, data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_features_default_to_empty() {
        let mut data = miami_condo();
        data.as_object_mut().unwrap().remove("features");
        let snapshot = parse_snapshot(SourceType::Property, data).unwrap();
        match snapshot {
            SourceSnapshot::Property(p) => assert!(p.features.is_empty()),
            SourceSnapshot::Vehicle(_) => unreachable!(),
        }
    }
}
