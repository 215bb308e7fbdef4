use chrono::NaiveDate;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::domain::{from_fields, Entity, Id};

use super::{ClientCode, HotelCode, Money, RoomKind};

/// Reservation ID
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Id for ReservationId {}

/// Natural references of a reservation.
///
/// `nemonic` is a convenience lookup key and is not unique: two reservations
/// for the same hotel, client and date share it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    hotel_code: HotelCode,
    client_code: ClientCode,
    date: NaiveDate,
    nemonic: String,
}

impl References {
    pub fn new(hotel_code: HotelCode, client_code: ClientCode, date: NaiveDate) -> Self {
        let nemonic = Self::nemonic_for(&hotel_code, &client_code, date);
        Self {
            hotel_code,
            client_code,
            date,
            nemonic,
        }
    }

    pub fn nemonic_for(hotel_code: &HotelCode, client_code: &ClientCode, date: NaiveDate) -> String {
        format!("{}_{}_{}", hotel_code, client_code, date.format("%Y-%m-%d"))
    }

    pub fn hotel_code(&self) -> &HotelCode {
        &self.hotel_code
    }

    pub fn client_code(&self) -> &ClientCode {
        &self.client_code
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn nemonic(&self) -> &str {
        &self.nemonic
    }
}

/// One line of a reservation: rooms of a kind at a per-night cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReservationDetail {
    #[serde(rename = "type_tag")]
    kind: RoomKind,
    quantity: u32,
    cost: Money,
}

impl ReservationDetail {
    pub fn create(kind: RoomKind, quantity: u32, cost: Money) -> Result<Self, ReservationError> {
        Self::validate_quantity(kind, quantity)?;
        Ok(Self {
            kind,
            quantity,
            cost,
        })
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    /// Per-night amount of this line.
    pub fn subtotal(&self) -> Money {
        self.cost * self.quantity
    }

    fn validate_quantity(kind: RoomKind, quantity: u32) -> Result<(), ReservationError> {
        if quantity < 1 {
            error!("Quantity for {} must be greater than zero", kind);
            return Err(ReservationError::QuantityNotPositive { kind });
        }
        Ok(())
    }
}

/// Reservation entity
///
/// A snapshot of catalog prices at creation time. Once stored it only
/// changes by being cancelled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredReservation")]
pub struct Reservation {
    id: ReservationId,
    references: References,
    nights: u32,
    detail: Vec<ReservationDetail>,
    total: Money,
    paid: bool,
}

impl Reservation {
    /// Builds a reservation, minting a new ID when `id` is `None`.
    pub fn create(
        id: Option<ReservationId>,
        references: References,
        nights: u32,
        detail: Vec<ReservationDetail>,
        total: Money,
        paid: bool,
    ) -> Result<Self, ReservationError> {
        Self::validate_created(nights, &detail, total)?;
        Ok(Reservation {
            id: id.unwrap_or_else(ReservationId::generate),
            references,
            nights,
            detail,
            total,
            paid,
        })
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn detail(&self) -> &[ReservationDetail] {
        &self.detail
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    fn validate_created(
        nights: u32,
        detail: &[ReservationDetail],
        total: Money,
    ) -> Result<(), ReservationError> {
        Self::validate_nights(nights)?;
        Self::validate_detail(detail)?;
        Self::validate_total(total)?;
        Ok(())
    }

    fn validate_nights(nights: u32) -> Result<(), ReservationError> {
        if nights < 1 {
            error!("Nights must be greater than zero");
            return Err(ReservationError::NightsNotPositive);
        }
        Ok(())
    }

    fn validate_detail(detail: &[ReservationDetail]) -> Result<(), ReservationError> {
        if detail.is_empty() {
            error!("Reservation detail cannot be empty");
            return Err(ReservationError::NoDetail);
        }
        detail
            .iter()
            .try_for_each(|d| ReservationDetail::validate_quantity(d.kind, d.quantity))
    }

    fn validate_total(total: Money) -> Result<(), ReservationError> {
        if !total.is_finite() {
            error!("Reservation total {} is out of range", total.amount());
            return Err(ReservationError::TotalOutOfRange {
                total: total.amount(),
            });
        }
        Ok(())
    }
}

/// Stored form of a reservation. Loading goes back through
/// [`Reservation::create`] so records keep their invariants.
#[derive(Deserialize)]
struct StoredReservation {
    id: ReservationId,
    references: References,
    nights: u32,
    detail: Vec<ReservationDetail>,
    total: Money,
    paid: bool,
}

impl TryFrom<StoredReservation> for Reservation {
    type Error = ReservationError;

    fn try_from(stored: StoredReservation) -> Result<Self, Self::Error> {
        Reservation::create(
            Some(stored.id),
            stored.references,
            stored.nights,
            stored.detail,
            stored.total,
            stored.paid,
        )
    }
}

/// `Σ (cost × quantity) × nights`
pub fn compute_total(detail: &[ReservationDetail], nights: u32) -> Money {
    detail.iter().map(ReservationDetail::subtotal).sum::<Money>() * nights
}

impl Entity for Reservation {
    type Id = ReservationId;

    const ENTITY_NAME: &'static str = "reservation";
    const FILE_NAME: &'static str = "reservations.json";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A requested line. Any cost sent by the caller is discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailRequest {
    #[serde(rename = "type_tag")]
    pub kind: RoomKind,
    pub quantity: u32,
    #[serde(default)]
    pub cost: Option<Money>,
}

impl DetailRequest {
    pub fn new(kind: RoomKind, quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            cost: None,
        }
    }
}

/// Raw reservation request as handed in by collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub hotel_code: HotelCode,
    pub client_code: ClientCode,
    pub date: NaiveDate,
    pub nights: u32,
    pub detail: Vec<DetailRequest>,
    #[serde(default)]
    pub paid: Option<bool>,
}

impl ReservationRequest {
    pub fn from_value(value: Value) -> Result<Self, ReservationError> {
        from_fields(Reservation::ENTITY_NAME, value)
            .map_err(|source| ReservationError::InvalidRequest { source })
    }
}

/// Reservation error
#[derive(Error, Display, Debug)]
pub enum ReservationError {
    #[display(fmt = "Nights must be greater than zero")]
    NightsNotPositive,
    #[display(fmt = "Reservation detail cannot be empty")]
    NoDetail,
    #[display(fmt = "Quantity for {} must be greater than zero", kind)]
    QuantityNotPositive { kind: RoomKind },
    #[display(fmt = "Reservation total {} is out of range", total)]
    TotalOutOfRange { total: f64 },
    #[display(fmt = "Invalid reservation request: {}", source)]
    InvalidRequest { source: serde_json::Error },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn references() -> References {
        References::new(
            "CAM123456ABC".into(),
            "PEJJ800101ABC".into(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
    }

    fn detail() -> Vec<ReservationDetail> {
        vec![ReservationDetail::create(RoomKind::Double, 2, Money::new(1500.0)).unwrap()]
    }

    #[test]
    fn test_references_nemonic() {
        assert_eq!(
            references().nemonic(),
            "CAM123456ABC_PEJJ800101ABC_2026-03-01"
        );
    }

    #[test]
    fn test_reservation_create_generates_id() {
        let a = Reservation::create(None, references(), 3, detail(), Money::new(9000.0), false)
            .unwrap();
        let b = Reservation::create(None, references(), 3, detail(), Money::new(9000.0), false)
            .unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().to_string().len(), 36);
    }

    #[test]
    fn test_reservation_create_keeps_id() {
        let id = ReservationId::generate();
        let reservation =
            Reservation::create(Some(id), references(), 3, detail(), Money::new(9000.0), true)
                .unwrap();
        assert_eq!(reservation.id(), id);
        assert!(reservation.is_paid());
    }

    #[test]
    fn test_reservation_structural_invariants() {
        assert!(matches!(
            Reservation::create(None, references(), 0, detail(), Money::ZERO, false),
            Err(ReservationError::NightsNotPositive)
        ));
        assert!(matches!(
            Reservation::create(None, references(), 3, vec![], Money::ZERO, false),
            Err(ReservationError::NoDetail)
        ));
        assert!(matches!(
            ReservationDetail::create(RoomKind::Double, 0, Money::new(1500.0)),
            Err(ReservationError::QuantityNotPositive {
                kind: RoomKind::Double
            })
        ));
    }

    #[test]
    fn test_reservation_rejects_overflowing_total() {
        let lines =
            vec![ReservationDetail::create(RoomKind::Suite, 2, Money::new(f64::MAX)).unwrap()];
        let total = compute_total(&lines, 3);
        assert!(!total.is_finite());
        assert!(matches!(
            Reservation::create(None, references(), 3, lines, total, false),
            Err(ReservationError::TotalOutOfRange { .. })
        ));
        assert!(matches!(
            Reservation::create(None, references(), 3, detail(), Money::new(f64::NAN), false),
            Err(ReservationError::TotalOutOfRange { .. })
        ));
    }

    #[test]
    fn test_stored_reservation_checked_on_load() {
        let reservation =
            Reservation::create(None, references(), 3, detail(), Money::new(9000.0), false)
                .unwrap();
        let value = serde_json::to_value(&reservation).unwrap();
        let loaded: Reservation = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(loaded, reservation);

        let mut no_nights = value.clone();
        no_nights["nights"] = json!(0);
        assert!(serde_json::from_value::<Reservation>(no_nights).is_err());

        let mut no_detail = value.clone();
        no_detail["detail"] = json!([]);
        assert!(serde_json::from_value::<Reservation>(no_detail).is_err());

        let mut no_quantity = value;
        no_quantity["detail"][0]["quantity"] = json!(0);
        let err = serde_json::from_value::<Reservation>(no_quantity).unwrap_err();
        assert!(err.to_string().contains("Quantity"));
    }

    #[test]
    fn test_compute_total() {
        let mut lines = detail();
        lines.push(ReservationDetail::create(RoomKind::Suite, 1, Money::new(3000.0)).unwrap());
        assert_eq!(compute_total(&lines, 3), Money::new(18000.0));
    }

    #[test]
    fn test_request_from_value() {
        let request = ReservationRequest::from_value(json!({
            "hotel_code": "CAM123456ABC",
            "client_code": "PEJJ800101ABC",
            "date": "2026-03-01",
            "nights": 3,
            "detail": [{"type_tag": "DOBLE", "quantity": 2, "cost": 0}],
        }))
        .unwrap();
        assert_eq!(request.paid, None);
        assert_eq!(request.detail[0].cost, Some(Money::ZERO));

        let err = ReservationRequest::from_value(json!({
            "hotel_code": "CAM123456ABC",
            "client_code": "PEJJ800101ABC",
            "date": "2026-03-01",
            "detail": [],
        }))
        .unwrap_err();
        assert!(err.to_string().contains("nights"));
    }
}
