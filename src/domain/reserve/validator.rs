//! Referential checks run before a reservation is created.

use derive_more::{Display, Error};

use crate::domain::core::{
    Client, ClientCode, DetailRequest, Hotel, HotelCode, Money, RoomKind, RoomType, RoomTypeId,
};
use crate::domain::Repository;

/// A referenced record that does not exist.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[display(fmt = "No hotel with tax code {}", code)]
    HotelNotFound { code: HotelCode },
    #[display(fmt = "No client with tax code {}", code)]
    ClientNotFound { code: ClientCode },
    #[display(fmt = "No room type {} for hotel {}", kind, hotel_code)]
    RoomTypeNotFound { hotel_code: HotelCode, kind: RoomKind },
}

pub fn hotel_exists<H: Repository<Hotel>>(hotels: &H, code: &HotelCode) -> bool {
    hotels.find_by_id(code).is_some()
}

pub fn client_exists<C: Repository<Client>>(clients: &C, code: &ClientCode) -> bool {
    clients.find_by_id(code).is_some()
}

/// Fails on the first requested kind the hotel does not offer.
pub fn room_types_exist<T: Repository<RoomType>>(
    room_types: &T,
    hotel_code: &HotelCode,
    detail: &[DetailRequest],
) -> Result<(), ReferenceError> {
    let catalog = room_types.find_all();
    detail.iter().try_for_each(|item| {
        match catalog
            .iter()
            .any(|rt| rt.hotel_code() == hotel_code && rt.kind() == item.kind)
        {
            true => Ok(()),
            false => Err(ReferenceError::RoomTypeNotFound {
                hotel_code: hotel_code.clone(),
                kind: item.kind,
            }),
        }
    })
}

/// Overwrites every line's cost with the catalog cost for the hotel.
///
/// Lookups are re-checked, so a missing room type is reported instead of
/// leaving that line priced by the caller.
pub fn apply_catalog_pricing<T: Repository<RoomType>>(
    room_types: &T,
    hotel_code: &HotelCode,
    detail: &mut [DetailRequest],
) -> Result<(), ReferenceError> {
    for item in detail.iter_mut() {
        let id = RoomTypeId::new(hotel_code.clone(), item.kind);
        let cost: Money = room_types
            .find_by_id(&id)
            .map(|rt| rt.cost())
            .ok_or_else(|| ReferenceError::RoomTypeNotFound {
                hotel_code: hotel_code.clone(),
                kind: item.kind,
            })?;
        item.cost = Some(cost);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::core::Classification;
    use crate::infrastructure::JsonStore;

    fn stores(dir: &TempDir) -> (JsonStore<Hotel>, JsonStore<RoomType>) {
        let hotels = JsonStore::<Hotel>::new(dir.path());
        let room_types = JsonStore::<RoomType>::new(dir.path());
        hotels.create(
            Hotel::create(
                "CAM123456ABC".into(),
                "Hotel Prueba".to_owned(),
                "Prueba SA".to_owned(),
                "Calle 1".to_owned(),
                "Jalisco".to_owned(),
                Classification::FiveStars,
                "active".to_owned(),
            )
            .unwrap(),
        );
        room_types.create(
            RoomType::create("CAM123456ABC".into(), RoomKind::Double, Money::new(1500.0)).unwrap(),
        );
        (hotels, room_types)
    }

    #[test]
    fn test_hotel_exists() {
        let dir = TempDir::new().unwrap();
        let (hotels, _) = stores(&dir);
        assert!(hotel_exists(&hotels, &"CAM123456ABC".into()));
        assert!(!hotel_exists(&hotels, &"MISSING".into()));
    }

    #[test]
    fn test_room_types_exist_reports_first_missing() {
        let dir = TempDir::new().unwrap();
        let (_, room_types) = stores(&dir);
        let hotel: HotelCode = "CAM123456ABC".into();
        let detail = vec![
            DetailRequest::new(RoomKind::Double, 1),
            DetailRequest::new(RoomKind::Suite, 1),
            DetailRequest::new(RoomKind::Deluxe, 1),
        ];
        assert_eq!(
            room_types_exist(&room_types, &hotel, &detail),
            Err(ReferenceError::RoomTypeNotFound {
                hotel_code: hotel.clone(),
                kind: RoomKind::Suite,
            })
        );
        assert!(room_types_exist(&room_types, &hotel, &detail[..1]).is_ok());
        assert!(room_types_exist(&room_types, &"OTHER".into(), &detail[..1]).is_err());
    }

    #[test]
    fn test_apply_catalog_pricing_overrides_cost() {
        let dir = TempDir::new().unwrap();
        let (_, room_types) = stores(&dir);
        let mut detail = vec![DetailRequest {
            kind: RoomKind::Double,
            quantity: 2,
            cost: Some(Money::new(1.0)),
        }];
        apply_catalog_pricing(&room_types, &"CAM123456ABC".into(), &mut detail).unwrap();
        assert_eq!(detail[0].cost, Some(Money::new(1500.0)));
    }

    #[test]
    fn test_apply_catalog_pricing_is_total() {
        let dir = TempDir::new().unwrap();
        let (_, room_types) = stores(&dir);
        let mut detail = vec![DetailRequest::new(RoomKind::Suite, 1)];
        assert!(matches!(
            apply_catalog_pricing(&room_types, &"CAM123456ABC".into(), &mut detail),
            Err(ReferenceError::RoomTypeNotFound { .. })
        ));
    }
}
