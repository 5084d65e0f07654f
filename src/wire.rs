use crate::cookie::{Cookie, COOKIE_LEN};
use crate::model::{EventView, ReservationView};
use crate::ticket::{TicketCode, TICKET_LEN};

pub const MAX_DATAGRAM_PAYLOAD: usize = 65507;
pub const MAX_REQUEST_SIZE: usize = 53;

pub const GET_EVENTS_ID: u8 = 1;
pub const EVENTS_REPLY_ID: u8 = 2;
pub const GET_RESERVATION_ID: u8 = 3;
pub const RESERVATION_REPLY_ID: u8 = 4;
pub const GET_TICKETS_ID: u8 = 5;
pub const TICKETS_REPLY_ID: u8 = 6;
pub const BAD_REQUEST_ID: u8 = 255;

const TICKETS_REPLY_HEADER: usize = 1 + 4 + 2;

pub const MAX_TICKETS_PER_RESERVATION: u16 =
    ((MAX_DATAGRAM_PAYLOAD - TICKETS_REPLY_HEADER) / TICKET_LEN) as u16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    GetEvents,
    GetReservation { event_id: u32, ticket_count: u16 },
    GetTickets { reservation_id: u32, cookie: Cookie },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty datagram")]
    Empty,
    #[error("unknown message id {0}")]
    UnknownMessageId(u8),
    #[error("message id {id} with inconsistent length {len}")]
    InvalidLength { id: u8, len: usize },
}

pub fn decode_request(datagram: &[u8]) -> Result<Request, DecodeError> {
    let (&id, body) = datagram.split_first().ok_or(DecodeError::Empty)?;
    let bad_length = || DecodeError::InvalidLength {
        id,
        len: datagram.len(),
    };
    match id {
        GET_EVENTS_ID => {
            if !body.is_empty() {
                return Err(bad_length());
            }
            Ok(Request::GetEvents)
        }
        GET_RESERVATION_ID => {
            if body.len() != 6 {
                return Err(bad_length());
            }
            Ok(Request::GetReservation {
                event_id: u32::from_be_bytes([body[0], body[1], body[2], body[3]]),
                ticket_count: u16::from_be_bytes([body[4], body[5]]),
            })
        }
        GET_TICKETS_ID => {
            if body.len() != 4 + COOKIE_LEN {
                return Err(bad_length());
            }
            let mut cookie = [0_u8; COOKIE_LEN];
            cookie.copy_from_slice(&body[4..]);
            Ok(Request::GetTickets {
                reservation_id: u32::from_be_bytes([body[0], body[1], body[2], body[3]]),
                cookie,
            })
        }
        other => Err(DecodeError::UnknownMessageId(other)),
    }
}

pub fn encode_events(events: &[EventView]) -> Vec<u8> {
    let mut frame = vec![EVENTS_REPLY_ID];
    for event in events {
        let event_size = 4 + 2 + 1 + event.description.len();
        if frame.len() + event_size > MAX_DATAGRAM_PAYLOAD {
            break;
        }
        frame.extend_from_slice(&event.event_id.to_be_bytes());
        frame.extend_from_slice(&event.available_tickets.to_be_bytes());
        frame.push(event.description.len() as u8);
        frame.extend_from_slice(&event.description);
    }
    frame
}

pub fn encode_reservation(reservation: &ReservationView) -> Vec<u8> {
    let mut frame = Vec::with_capacity(1 + 4 + 4 + 2 + COOKIE_LEN + 8);
    frame.push(RESERVATION_REPLY_ID);
    frame.extend_from_slice(&reservation.reservation_id.to_be_bytes());
    frame.extend_from_slice(&reservation.event_id.to_be_bytes());
    frame.extend_from_slice(&reservation.ticket_count.to_be_bytes());
    frame.extend_from_slice(&reservation.cookie);
    frame.extend_from_slice(&reservation.expires_at.to_be_bytes());
    frame
}

pub fn encode_tickets(reservation_id: u32, tickets: &[TicketCode]) -> Vec<u8> {
    // blocks are capped at MAX_TICKETS_PER_RESERVATION when reserved, so the
    // frame always fits a single datagram
    let mut frame = Vec::with_capacity(TICKETS_REPLY_HEADER + tickets.len() * TICKET_LEN);
    frame.push(TICKETS_REPLY_ID);
    frame.extend_from_slice(&reservation_id.to_be_bytes());
    frame.extend_from_slice(&(tickets.len() as u16).to_be_bytes());
    for ticket in tickets {
        frame.extend_from_slice(ticket.as_bytes());
    }
    frame
}

pub fn encode_bad_request(request_id: u32) -> Vec<u8> {
    let mut frame = Vec::with_capacity(5);
    frame.push(BAD_REQUEST_ID);
    frame.extend_from_slice(&request_id.to_be_bytes());
    frame
}
