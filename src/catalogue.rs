use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const MAX_DESCRIPTION_LEN: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: u32,
    pub description: Vec<u8>,
    pub available_tickets: u16,
}

#[derive(Debug, Default)]
pub struct Catalogue {
    events: Vec<Event>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn add_event(&mut self, description: Vec<u8>, ticket_count: u16) {
        self.events.push(Event {
            event_id: self.events.len() as u32,
            description,
            available_tickets: ticket_count,
        });
    }

    pub fn get(&self, event_id: u32) -> Option<&Event> {
        self.events.get(event_id as usize)
    }

    pub fn get_mut(&mut self, event_id: u32) -> Option<&mut Event> {
        self.events.get_mut(event_id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    // pairs of lines: a description, then its ticket count; parsing stops at
    // EOF or at the first malformed pair
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, CatalogueError> {
        let mut catalogue = Self::new();
        loop {
            let Some(description) = read_line(&mut reader)? else {
                break;
            };
            if description.is_empty() || description.len() > MAX_DESCRIPTION_LEN {
                break;
            }
            let Some(count_line) = read_line(&mut reader)? else {
                break;
            };
            let Some(ticket_count) = parse_count(&count_line) else {
                break;
            };
            catalogue.add_event(description, ticket_count);
        }
        Ok(catalogue)
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(Some(line))
}

fn parse_count(line: &[u8]) -> Option<u16> {
    std::str::from_utf8(line).ok()?.parse::<u16>().ok()
}
