use std::fmt;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{from_fields, Aggregation, Entity, Id};

use super::{HotelCode, Money, RoomKind};

/// Composite key of a room type: one entry per hotel and kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomTypeId {
    pub hotel_code: HotelCode,
    pub kind: RoomKind,
}

impl RoomTypeId {
    pub fn new(hotel_code: HotelCode, kind: RoomKind) -> Self {
        Self { hotel_code, kind }
    }
}

impl fmt::Display for RoomTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.hotel_code, self.kind)
    }
}

impl Id for RoomTypeId {}

/// Field-level change accepted by [`RoomType`]
#[derive(Clone, Debug, PartialEq)]
pub enum RoomTypeChange {
    /// Per-night cost changed
    Cost(Money),
}

/// Room type catalog entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    hotel_code: HotelCode,
    #[serde(rename = "type_tag")]
    kind: RoomKind,
    cost: Money,
}

impl RoomType {
    pub fn create(hotel_code: HotelCode, kind: RoomKind, cost: Money) -> Result<Self, RoomTypeError> {
        Self::validate_cost(cost)?;
        Ok(RoomType {
            hotel_code,
            kind,
            cost,
        })
    }

    pub fn from_value(value: Value) -> Result<Self, RoomTypeError> {
        let room_type: RoomType = from_fields(Self::ENTITY_NAME, value)
            .map_err(|source| RoomTypeError::InvalidFields { source })?;
        Self::validate_cost(room_type.cost)?;
        Ok(room_type)
    }

    pub fn hotel_code(&self) -> &HotelCode {
        &self.hotel_code
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    fn validate_cost(cost: Money) -> Result<(), RoomTypeError> {
        if !cost.is_positive() {
            tracing::error!("Cost must be a positive amount, got {}", cost.amount());
            return Err(RoomTypeError::CostNotPositive {
                cost: cost.amount(),
            });
        }
        Ok(())
    }
}

impl Entity for RoomType {
    type Id = RoomTypeId;

    const ENTITY_NAME: &'static str = "room type";
    const FILE_NAME: &'static str = "room_types.json";

    fn id(&self) -> Self::Id {
        RoomTypeId::new(self.hotel_code.clone(), self.kind)
    }
}

impl Aggregation for RoomType {
    type Change = RoomTypeChange;
    type Error = RoomTypeError;

    const MUTABLE_FIELDS: &'static [&'static str] = &["cost"];

    fn change_from_field(field: &str, value: Value) -> Result<Self::Change, Self::Error> {
        match field {
            "cost" => {
                let cost = serde_json::from_value(value).map_err(|source| {
                    RoomTypeError::InvalidValue {
                        field: field.to_owned(),
                        source,
                    }
                })?;
                Ok(RoomTypeChange::Cost(cost))
            }
            _ => Err(RoomTypeError::NotModifiable {
                field: field.to_owned(),
            }),
        }
    }

    fn validate(&self, change: &Self::Change) -> Result<(), Self::Error> {
        match change {
            RoomTypeChange::Cost(cost) => Self::validate_cost(*cost),
        }
    }

    fn apply(&mut self, change: Self::Change) {
        match change {
            RoomTypeChange::Cost(cost) => self.cost = cost,
        }
    }
}

/// Room type error
#[derive(Error, Display, Debug)]
pub enum RoomTypeError {
    #[display(fmt = "Cost must be a positive amount, got {}", cost)]
    CostNotPositive { cost: f64 },
    #[display(fmt = "Invalid room type fields: {}", source)]
    InvalidFields { source: serde_json::Error },
    #[display(fmt = "Invalid value for '{}': {}", field, source)]
    InvalidValue {
        field: String,
        source: serde_json::Error,
    },
    #[display(fmt = "Attribute '{}' is not modifiable", field)]
    NotModifiable { field: String },
}
