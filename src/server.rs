use crate::engine::ReservationEngine;
use crate::model::now_seconds;
use crate::wire::{self, Request, MAX_DATAGRAM_PAYLOAD};
use std::io;
use std::net::Ipv4Addr;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

pub fn handle_datagram(
    engine: &mut ReservationEngine,
    datagram: &[u8],
    now: u64,
) -> Option<Vec<u8>> {
    let request = match wire::decode_request(datagram) {
        Ok(request) => request,
        Err(err) => {
            debug!(len = datagram.len(), %err, "dropping malformed datagram");
            return None;
        }
    };

    let reply = match request {
        Request::GetEvents => wire::encode_events(&engine.list_events(now)),
        Request::GetReservation {
            event_id,
            ticket_count,
        } => match engine.reserve(event_id, ticket_count, now) {
            Ok(reservation) => wire::encode_reservation(&reservation),
            Err(err) => {
                debug!(event_id, ticket_count, %err, "reservation refused");
                wire::encode_bad_request(event_id)
            }
        },
        Request::GetTickets {
            reservation_id,
            cookie,
        } => match engine.redeem(reservation_id, &cookie, now) {
            Ok(tickets) => wire::encode_tickets(reservation_id, &tickets),
            Err(err) => {
                debug!(reservation_id, %err, "redemption refused");
                wire::encode_bad_request(reservation_id)
            }
        },
    };
    Some(reply)
}

// one request is received, handled, and answered before the next is read
pub async fn run(mut engine: ReservationEngine, port: u16) -> io::Result<()> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    info!(port, events = engine.event_count(), timeout = engine.timeout(), "listening");

    let mut buffer = vec![0_u8; MAX_DATAGRAM_PAYLOAD];
    loop {
        let (len, peer) = match socket.recv_from(&mut buffer).await {
            Ok(received) => received,
            Err(err) => {
                warn!(%err, "receive failed");
                continue;
            }
        };
        let Some(reply) = handle_datagram(&mut engine, &buffer[..len], now_seconds()) else {
            continue;
        };
        if let Err(err) = socket.send_to(&reply, peer).await {
            warn!(%err, %peer, "failed to send reply");
        }
    }
}
