use crate::domain::core::Reservation;
use crate::infrastructure::JsonStore;

pub type JsonReservationRepository = JsonStore<Reservation>;
