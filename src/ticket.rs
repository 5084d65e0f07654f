use serde::{Deserialize, Serialize};
use std::fmt;

pub const TICKET_LEN: usize = 7;

const ALPHABET_LEN: u64 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketCode([u8; TICKET_LEN]);

impl TicketCode {
    pub const FIRST: TicketCode = TicketCode([b'0'; TICKET_LEN]);

    pub fn as_bytes(&self) -> &[u8; TICKET_LEN] {
        &self.0
    }

    // the last byte is the least significant digit; overflow past "ZZZZZZZ"
    // wraps, which takes roughly 78 billion codes
    pub fn advance(&mut self, amount: u64) {
        let mut carry = amount;
        for slot in self.0.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let value = u64::from(digit_value(*slot)) + carry;
            *slot = digit_char((value % ALPHABET_LEN) as u8);
            carry = value / ALPHABET_LEN;
        }
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the alphabet is pure ASCII
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("???????"))
    }
}

fn digit_value(digit: u8) -> u8 {
    if digit <= b'9' {
        digit - b'0'
    } else {
        digit - b'A' + 10
    }
}

fn digit_char(value: u8) -> u8 {
    if value < 10 {
        b'0' + value
    } else {
        b'A' + value - 10
    }
}

#[derive(Debug)]
pub struct TicketMinter {
    counter: TicketCode,
}

impl TicketMinter {
    pub fn new() -> Self {
        Self {
            counter: TicketCode::FIRST,
        }
    }

    pub fn reserve_block(&mut self, count: u16) -> TicketCode {
        let base = self.counter;
        self.counter.advance(u64::from(count));
        base
    }
}

impl Default for TicketMinter {
    fn default() -> Self {
        Self::new()
    }
}
