use crate::domain::core::{HotelCode, RoomKind, RoomType, RoomTypeId};
use crate::domain::Repository;
use crate::infrastructure::JsonStore;

pub type JsonRoomTypeRepository = JsonStore<RoomType>;

impl JsonStore<RoomType> {
    pub fn find_room_type(&self, hotel_code: &HotelCode, kind: RoomKind) -> Option<RoomType> {
        self.find_by_id(&RoomTypeId::new(hotel_code.clone(), kind))
    }

    /// Every room type offered by one hotel.
    pub fn find_by_hotel(&self, hotel_code: &HotelCode) -> Vec<RoomType> {
        self.load()
            .into_values()
            .filter(|rt| rt.hotel_code() == hotel_code)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::{json, Value};
    use tempfile::TempDir;

    use super::JsonRoomTypeRepository;
    use crate::domain::core::{HotelCode, Money, RoomKind, RoomType, RoomTypeChange, RoomTypeError};
    use crate::domain::{Entity, Repository};

    fn room_type(kind: RoomKind, cost: f64) -> RoomType {
        RoomType::create("CAM123456ABC".into(), kind, Money::new(cost)).unwrap()
    }

    #[test]
    fn test_repository() {
        let dir = TempDir::new().unwrap();
        let repo = JsonRoomTypeRepository::new(dir.path());
        let hotel = HotelCode::from("CAM123456ABC");

        assert!(repo.create(room_type(RoomKind::Double, 1500.0)).is_some());
        assert!(repo.create(room_type(RoomKind::Double, 2000.0)).is_none());
        assert!(repo.create(room_type(RoomKind::Suite, 3000.0)).is_some());
        assert_eq!(
            repo.find_room_type(&hotel, RoomKind::Double).map(|rt| rt.cost()),
            Some(Money::new(1500.0))
        );
        assert_eq!(repo.find_by_hotel(&hotel).len(), 2);
        assert!(repo.find_by_hotel(&"OTHER".into()).is_empty());

        let raw: Value = serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(
            raw["CAM123456ABC_SUITE"],
            json!({"hotel_code": "CAM123456ABC", "type_tag": "SUITE", "cost": 3000.0})
        );

        assert!(repo.delete(&room_type(RoomKind::Suite, 1.0).id()));
        assert!(repo.find_room_type(&hotel, RoomKind::Suite).is_none());
    }

    #[test]
    fn test_modify_cost() {
        let dir = TempDir::new().unwrap();
        let repo = JsonRoomTypeRepository::new(dir.path());
        let mut entity = repo.create(room_type(RoomKind::Double, 1500.0)).unwrap();

        assert!(repo
            .modify(&mut entity, vec![RoomTypeChange::Cost(Money::new(1800.0))])
            .unwrap());
        assert_eq!(entity.cost(), Money::new(1800.0));
        assert_eq!(
            repo.find_by_id(&entity.id()).map(|rt| rt.cost()),
            Some(Money::new(1800.0))
        );
    }

    #[test]
    fn test_modify_non_positive_cost_aborts() {
        let dir = TempDir::new().unwrap();
        let repo = JsonRoomTypeRepository::new(dir.path());
        let mut entity = repo.create(room_type(RoomKind::Double, 1500.0)).unwrap();

        let fields = json!({"cost": 0, "kind": "SUITE"}).as_object().cloned().unwrap();
        let result = repo.modify_fields(&mut entity, fields);
        assert!(matches!(result, Err(RoomTypeError::CostNotPositive { .. })));
        assert_eq!(entity.cost(), Money::new(1500.0));
        assert_eq!(
            repo.find_by_id(&entity.id()).map(|rt| rt.cost()),
            Some(Money::new(1500.0))
        );
    }
}
