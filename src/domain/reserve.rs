pub mod validator;

use tracing::{info, warn};

use crate::domain::core::{
    compute_total, Client, ClientCode, DetailRequest, Hotel, HotelCode, References, Reservation,
    ReservationDetail, ReservationError, ReservationId, ReservationRequest, RoomType,
};
use crate::domain::{Entity, Repository};

use self::validator::ReferenceError;

/// Reservation engine.
///
/// Checks a request against the hotel, client and room type catalogs, prices
/// it from the catalog and stores the result.
pub struct ReservationService<H, C, T, R> {
    hotels: H,
    clients: C,
    room_types: T,
    reservations: R,
}

impl<H, C, T, R> ReservationService<H, C, T, R>
where
    H: Repository<Hotel>,
    C: Repository<Client>,
    T: Repository<RoomType>,
    R: Repository<Reservation>,
{
    pub fn new(hotels: H, clients: C, room_types: T, reservations: R) -> Self {
        Self {
            hotels,
            clients,
            room_types,
            reservations,
        }
    }

    pub fn hotels(&self) -> &H {
        &self.hotels
    }

    pub fn clients(&self) -> &C {
        &self.clients
    }

    pub fn room_types(&self) -> &T {
        &self.room_types
    }

    pub fn reservations(&self) -> &R {
        &self.reservations
    }

    /// Creates and stores a reservation.
    ///
    /// Missing references are reported and yield `Ok(None)`; a request that
    /// breaks the reservation's own invariants yields `Err`. Nothing is
    /// stored in either case.
    pub fn create(
        &self,
        request: ReservationRequest,
    ) -> Result<Option<Reservation>, ReservationError> {
        let ReservationRequest {
            hotel_code,
            client_code,
            date,
            nights,
            mut detail,
            paid,
        } = request;

        if let Err(e) = self.check_references(&hotel_code, &client_code, &mut detail) {
            warn!("Reservation not created: {}", e);
            return Ok(None);
        }

        let detail = detail
            .into_iter()
            .map(|item| {
                ReservationDetail::create(item.kind, item.quantity, item.cost.unwrap_or_default())
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total = compute_total(&detail, nights);
        let references = References::new(hotel_code, client_code, date);
        let reservation = Reservation::create(
            None,
            references,
            nights,
            detail,
            total,
            paid.unwrap_or(false),
        )?;

        let created = self.reservations.create(reservation);
        if let Some(reservation) = &created {
            info!(
                "Reservation {} created for {} ({})",
                reservation.id(),
                reservation.references().nemonic(),
                reservation.total()
            );
        }
        Ok(created)
    }

    /// Creates a reservation and records its ID on the hotel.
    ///
    /// The request is booked against `hotel` regardless of the hotel code it
    /// carries.
    pub fn reserve_room(
        &self,
        hotel: &mut Hotel,
        mut request: ReservationRequest,
    ) -> Result<Option<Reservation>, ReservationError> {
        request.hotel_code = hotel.code().clone();
        let created = self.create(request)?;
        if let Some(reservation) = &created {
            let id = reservation.id();
            hotel.attach_reservation(id);
            if !self
                .hotels
                .update(&hotel.id(), |stored| stored.attach_reservation(id))
            {
                warn!("Hotel {} not stored, reservation list not updated", hotel.id());
            }
        }
        Ok(created)
    }

    /// Deletes a stored reservation. A second call for the same reservation
    /// reports it as not found and returns `false`.
    pub fn cancel(&self, reservation: &Reservation) -> bool {
        let deleted = self.reservations.delete(&reservation.id());
        if deleted {
            info!("Reservation {} cancelled", reservation.id());
        }
        deleted
    }

    /// Cancels a reservation and removes it from the hotel's list.
    pub fn cancel_for_hotel(&self, hotel: &mut Hotel, reservation: &Reservation) -> bool {
        if !self.cancel(reservation) {
            return false;
        }
        let id = reservation.id();
        hotel.detach_reservation(&id);
        if !self
            .hotels
            .update(&hotel.id(), |stored| stored.detach_reservation(&id))
        {
            warn!("Hotel {} not stored, reservation list not updated", hotel.id());
        }
        true
    }

    pub fn find(&self, id: &ReservationId) -> Option<Reservation> {
        self.reservations.find_by_id(id)
    }

    /// First reservation whose nemonic reference matches.
    pub fn find_by_reference(&self, nemonic: &str) -> Option<Reservation> {
        self.reservations
            .find_first(|r| r.references().nemonic() == nemonic)
    }

    fn check_references(
        &self,
        hotel_code: &HotelCode,
        client_code: &ClientCode,
        detail: &mut [DetailRequest],
    ) -> Result<(), ReferenceError> {
        if !validator::hotel_exists(&self.hotels, hotel_code) {
            return Err(ReferenceError::HotelNotFound {
                code: hotel_code.clone(),
            });
        }
        if !validator::client_exists(&self.clients, client_code) {
            return Err(ReferenceError::ClientNotFound {
                code: client_code.clone(),
            });
        }
        validator::room_types_exist(&self.room_types, hotel_code, detail)?;
        validator::apply_catalog_pricing(&self.room_types, hotel_code, detail)
    }
}
