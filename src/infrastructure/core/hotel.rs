use crate::domain::core::Hotel;
use crate::infrastructure::JsonStore;

pub type JsonHotelRepository = JsonStore<Hotel>;
