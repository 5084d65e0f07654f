use crate::catalogue::Catalogue;
use crate::cookie::{self, Cookie};
use crate::model::{EventView, RequestError, ReservationView};
use crate::store::{ExpiryEntry, ExpiryQueue, PendingReservation, ReservationStore};
use crate::ticket::{TicketCode, TicketMinter};
use crate::wire::MAX_TICKETS_PER_RESERVATION;

pub const MIN_RESERVATION_ID: u32 = 10_000_000;

#[derive(Debug)]
pub struct ReservationEngine {
    catalogue: Catalogue,
    timeout: u64,
    store: ReservationStore,
    expiry_queue: ExpiryQueue,
    next_reservation_id: u32,
    minter: TicketMinter,
}

impl ReservationEngine {
    pub fn new(catalogue: Catalogue, timeout: u64) -> Self {
        Self {
            catalogue,
            timeout,
            store: ReservationStore::default(),
            expiry_queue: ExpiryQueue::default(),
            next_reservation_id: MIN_RESERVATION_ID,
            minter: TicketMinter::new(),
        }
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn event_count(&self) -> usize {
        self.catalogue.len()
    }

    pub fn pending_reservations(&self) -> usize {
        self.store.len()
    }

    pub fn list_events(&mut self, now: u64) -> Vec<EventView> {
        self.clean_queue(now);
        self.catalogue
            .iter()
            .map(|event| EventView {
                event_id: event.event_id,
                available_tickets: event.available_tickets,
                description: event.description.clone(),
            })
            .collect()
    }

    pub fn reserve(
        &mut self,
        event_id: u32,
        ticket_count: u16,
        now: u64,
    ) -> Result<ReservationView, RequestError> {
        self.clean_queue(now);

        if ticket_count == 0 {
            return Err(RequestError::InvalidTicketCount);
        }
        if ticket_count > MAX_TICKETS_PER_RESERVATION {
            return Err(RequestError::TooManyTickets);
        }
        let event = self
            .catalogue
            .get_mut(event_id)
            .ok_or(RequestError::EventNotFound)?;
        if event.available_tickets < ticket_count {
            return Err(RequestError::TicketShortage);
        }
        event.available_tickets -= ticket_count;

        let reservation_id = self.next_reservation_id;
        self.next_reservation_id += 1;
        let expires_at = now + self.timeout;
        let ticket_base = self.minter.reserve_block(ticket_count);
        let cookie = cookie::derive(reservation_id);

        self.store.insert(
            reservation_id,
            PendingReservation {
                event_id,
                ticket_count,
                cookie,
                expires_at,
                ticket_base,
                redeemed: false,
            },
        );
        self.expiry_queue.push_back(ExpiryEntry {
            reservation_id,
            expires_at,
        });

        Ok(ReservationView {
            reservation_id,
            event_id,
            ticket_count,
            cookie,
            expires_at,
        })
    }

    pub fn redeem(
        &mut self,
        reservation_id: u32,
        presented: &Cookie,
        now: u64,
    ) -> Result<Vec<TicketCode>, RequestError> {
        self.clean_queue(now);

        let record = self
            .store
            .get_mut(reservation_id)
            .ok_or(RequestError::ReservationNotFound)?;
        if !cookie::verify(presented, &record.cookie) {
            return Err(RequestError::InvalidCookie);
        }
        record.redeemed = true;

        let mut tickets = Vec::with_capacity(usize::from(record.ticket_count));
        let mut code = record.ticket_base;
        for _ in 0..record.ticket_count {
            tickets.push(code);
            code.advance(1);
        }
        Ok(tickets)
    }

    pub fn clean_queue(&mut self, now: u64) {
        while let Some(front) = self.expiry_queue.front().copied() {
            if front.expires_at >= now {
                break;
            }
            self.expiry_queue.pop_front();
            self.remove_expired(front.reservation_id);
        }
    }

    // a redeemed reservation keeps its tickets; only unredeemed holds go back
    fn remove_expired(&mut self, reservation_id: u32) {
        let expired = matches!(
            self.store.get(reservation_id),
            Some(record) if !record.redeemed
        );
        if !expired {
            return;
        }
        if let Some(record) = self.store.remove(reservation_id) {
            if let Some(event) = self.catalogue.get_mut(record.event_id) {
                event.available_tickets += record.ticket_count;
            }
        }
    }
}
