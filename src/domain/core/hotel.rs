use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{from_fields, Aggregation, Entity, Id};

use super::{Classification, ReservationId};

/// Hotel tax registration code
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref)]
#[serde(transparent)]
pub struct HotelCode(String);

impl Id for HotelCode {}

impl From<&str> for HotelCode {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Field-level change accepted by [`Hotel`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HotelChange {
    /// Commercial name changed
    Name(String),
    /// Legal (registered) name changed
    LegalName(String),
    /// Address changed
    Address(String),
    /// Region changed
    Region(String),
    /// Official classification changed
    Classification(Classification),
    /// Status changed
    Status(String),
}

/// Hotel entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    code: HotelCode,
    name: String,
    legal_name: String,
    address: String,
    region: String,
    classification: Classification,
    status: String,
    #[serde(default)]
    reservations: Vec<ReservationId>,
}

impl Hotel {
    pub fn create(
        code: HotelCode,
        name: String,
        legal_name: String,
        address: String,
        region: String,
        classification: Classification,
        status: String,
    ) -> Result<Self, HotelError> {
        Self::validate_code(&code)?;
        Ok(Hotel {
            code,
            name,
            legal_name,
            address,
            region,
            classification,
            status,
            reservations: Vec::new(),
        })
    }

    /// Builds a hotel from a raw field mapping.
    pub fn from_value(value: Value) -> Result<Self, HotelError> {
        let hotel: Hotel = from_fields(Self::ENTITY_NAME, value)
            .map_err(|source| HotelError::InvalidFields { source })?;
        Self::validate_code(&hotel.code)?;
        Ok(hotel)
    }

    pub fn code(&self) -> &HotelCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Reservations attached to this hotel. Not authoritative.
    pub fn reservations(&self) -> &[ReservationId] {
        &self.reservations
    }

    pub fn attach_reservation(&mut self, id: ReservationId) {
        if !self.reservations.contains(&id) {
            self.reservations.push(id);
        }
    }

    pub fn detach_reservation(&mut self, id: &ReservationId) {
        self.reservations.retain(|r| r != id);
    }

    fn validate_code(code: &HotelCode) -> Result<(), HotelError> {
        if code.trim().is_empty() {
            tracing::error!("Hotel tax code cannot be blank");
            return Err(HotelError::CodeIsBlank);
        }
        Ok(())
    }
}

impl Entity for Hotel {
    type Id = HotelCode;

    const ENTITY_NAME: &'static str = "hotel";
    const FILE_NAME: &'static str = "hotels.json";

    fn id(&self) -> Self::Id {
        self.code.clone()
    }
}

impl Aggregation for Hotel {
    type Change = HotelChange;
    type Error = HotelError;

    const MUTABLE_FIELDS: &'static [&'static str] = &[
        "name",
        "legal_name",
        "address",
        "region",
        "classification",
        "status",
    ];

    fn change_from_field(field: &str, value: Value) -> Result<Self::Change, Self::Error> {
        let invalid = |source| HotelError::InvalidValue {
            field: field.to_owned(),
            source,
        };
        Ok(match field {
            "name" => HotelChange::Name(serde_json::from_value(value).map_err(invalid)?),
            "legal_name" => HotelChange::LegalName(serde_json::from_value(value).map_err(invalid)?),
            "address" => HotelChange::Address(serde_json::from_value(value).map_err(invalid)?),
            "region" => HotelChange::Region(serde_json::from_value(value).map_err(invalid)?),
            "classification" => {
                HotelChange::Classification(serde_json::from_value(value).map_err(invalid)?)
            }
            "status" => HotelChange::Status(serde_json::from_value(value).map_err(invalid)?),
            _ => {
                return Err(HotelError::NotModifiable {
                    field: field.to_owned(),
                })
            }
        })
    }

    fn validate(&self, _change: &Self::Change) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply(&mut self, change: Self::Change) {
        match change {
            HotelChange::Name(name) => self.name = name,
            HotelChange::LegalName(legal_name) => self.legal_name = legal_name,
            HotelChange::Address(address) => self.address = address,
            HotelChange::Region(region) => self.region = region,
            HotelChange::Classification(classification) => self.classification = classification,
            HotelChange::Status(status) => self.status = status,
        }
    }
}

/// Hotel error
#[derive(Error, Display, Debug)]
pub enum HotelError {
    #[display(fmt = "Hotel tax code cannot be blank")]
    CodeIsBlank,
    #[display(fmt = "Invalid hotel fields: {}", source)]
    InvalidFields { source: serde_json::Error },
    #[display(fmt = "Invalid value for '{}': {}", field, source)]
    InvalidValue {
        field: String,
        source: serde_json::Error,
    },
    #[display(fmt = "Attribute '{}' is not modifiable", field)]
    NotModifiable { field: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn hotel_fields() -> Value {
        json!({
            "code": "CAM123456ABC",
            "name": "Hotel Camino Real",
            "legal_name": "Camino Real SA de CV",
            "address": "Av. Principal 100",
            "region": "Jalisco",
            "classification": "5E",
            "status": "active",
        })
    }

    #[test]
    fn test_hotel_from_value() {
        let hotel = Hotel::from_value(hotel_fields()).unwrap();
        assert_eq!(hotel.id(), HotelCode::from("CAM123456ABC"));
        assert_eq!(hotel.name(), "Hotel Camino Real");
        assert_eq!(hotel.classification(), Classification::FiveStars);
        assert!(hotel.reservations().is_empty());
    }

    #[test]
    fn test_hotel_invalid_classification() {
        let mut fields = hotel_fields();
        fields["classification"] = json!("9E");
        let err = Hotel::from_value(fields).unwrap_err();
        assert!(matches!(err, HotelError::InvalidFields { .. }));
        assert!(err.to_string().contains("9E"));
    }

    #[test]
    fn test_hotel_missing_field() {
        let mut fields = hotel_fields();
        fields.as_object_mut().unwrap().remove("code");
        let err = Hotel::from_value(fields).unwrap_err();
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn test_hotel_blank_code() {
        let mut fields = hotel_fields();
        fields["code"] = json!("  ");
        assert!(matches!(
            Hotel::from_value(fields),
            Err(HotelError::CodeIsBlank)
        ));
    }

    #[test]
    fn test_hotel_apply_changes() {
        let mut hotel = Hotel::from_value(hotel_fields()).unwrap();
        let change = Hotel::change_from_field("classification", json!("3E")).unwrap();
        hotel.apply(change);
        hotel.apply(HotelChange::Region("Nuevo Leon".to_owned()));
        assert_eq!(hotel.classification(), Classification::ThreeStars);
        assert_eq!(hotel.region(), "Nuevo Leon");
        assert!(matches!(
            Hotel::change_from_field("code", json!("OTHER")),
            Err(HotelError::NotModifiable { .. })
        ));
    }

    #[test]
    fn test_hotel_reservation_list() {
        let mut hotel = Hotel::from_value(hotel_fields()).unwrap();
        let id = ReservationId::generate();
        hotel.attach_reservation(id);
        hotel.attach_reservation(id);
        assert_eq!(hotel.reservations(), &[id]);
        hotel.detach_reservation(&id);
        assert!(hotel.reservations().is_empty());
    }
}
