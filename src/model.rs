use crate::cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    pub event_id: u32,
    pub available_tickets: u16,
    pub description: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationView {
    pub reservation_id: u32,
    pub event_id: u32,
    pub ticket_count: u16,
    pub cookie: Cookie,
    pub expires_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("the event does not exist")]
    EventNotFound,
    #[error("the provided ticket count is invalid")]
    InvalidTicketCount,
    #[error("the tickets would not fit in a single datagram")]
    TooManyTickets,
    #[error("too few tickets available")]
    TicketShortage,
    #[error("the reservation does not exist")]
    ReservationNotFound,
    #[error("invalid cookie")]
    InvalidCookie,
}

pub fn now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
