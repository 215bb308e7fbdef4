mod client;
mod hotel;
mod reservation;
mod room_type;

use crate::domain::reserve::ReservationService;
use crate::Storage;

pub use self::client::*;
pub use self::hotel::*;
pub use self::reservation::*;
pub use self::room_type::*;

pub type JsonReservationService = ReservationService<
    JsonHotelRepository,
    JsonClientRepository,
    JsonRoomTypeRepository,
    JsonReservationRepository,
>;

impl JsonReservationService {
    /// Opens the four stores under the configured data directory.
    pub fn open(storage: &Storage) -> Self {
        let dir = &storage.data_dir;
        ReservationService::new(
            JsonHotelRepository::new(dir),
            JsonClientRepository::new(dir),
            JsonRoomTypeRepository::new(dir),
            JsonReservationRepository::new(dir),
        )
    }
}
