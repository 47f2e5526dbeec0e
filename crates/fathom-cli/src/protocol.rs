//! Reader for the referee's whitespace-separated numeric protocol.
//!
//! The roster is sent once, then one snapshot per turn. Counts are read as declared; their
//! bounds are checked when the snapshot is applied to the game state.

use std::{collections::VecDeque, io, str::FromStr};

use fathom_engine::{
    BlipReport, DroneReport, EntityId, Quadrant, RosterEntry, ScanReport, TurnSnapshot,
    UnknownQuadrantError, Vec2, VisibleCreature,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ProtocolError {
    #[display("input ended while reading {field}")]
    UnexpectedEof { field: &'static str },
    #[display("invalid {field}: {token:?}")]
    InvalidNumber { field: &'static str, token: String },
    #[display("{_0}")]
    #[from]
    Quadrant(UnknownQuadrantError),
    #[display("failed to read input")]
    #[from]
    Io(io::Error),
}

/// Splits buffered input into tokens, one line at a time.
#[derive(Debug)]
pub struct TokenReader<R> {
    reader: R,
    tokens: VecDeque<String>,
}

impl<R> TokenReader<R>
where
    R: io::BufRead,
{
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
        }
    }

    /// Returns `true` once only whitespace remains.
    pub fn is_exhausted(&mut self) -> Result<bool, ProtocolError> {
        self.fill()?;
        Ok(self.tokens.is_empty())
    }

    fn fill(&mut self) -> Result<(), ProtocolError> {
        let mut line = String::new();
        while self.tokens.is_empty() {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            self.tokens.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(())
    }

    pub fn token(&mut self, field: &'static str) -> Result<String, ProtocolError> {
        self.fill()?;
        self.tokens
            .pop_front()
            .ok_or(ProtocolError::UnexpectedEof { field })
    }

    pub fn parse<T>(&mut self, field: &'static str) -> Result<T, ProtocolError>
    where
        T: FromStr,
    {
        let token = self.token(field)?;
        token
            .parse()
            .map_err(|_| ProtocolError::InvalidNumber { field, token })
    }

    fn id(&mut self, field: &'static str) -> Result<EntityId, ProtocolError> {
        self.parse(field).map(EntityId)
    }

    fn point(&mut self, field: &'static str) -> Result<Vec2, ProtocolError> {
        Ok(Vec2::new(self.parse(field)?, self.parse(field)?))
    }

    /// Reads a count followed by that many items.
    fn list<T>(
        &mut self,
        field: &'static str,
        mut item: impl FnMut(&mut Self) -> Result<T, ProtocolError>,
    ) -> Result<Vec<T>, ProtocolError> {
        let count: usize = self.parse(field)?;
        (0..count).map(|_| item(self)).collect()
    }
}

/// Reads the creature roster sent before the first turn.
pub fn read_roster<R>(reader: &mut TokenReader<R>) -> Result<Vec<RosterEntry>, ProtocolError>
where
    R: io::BufRead,
{
    reader.list("creature count", |r| {
        Ok(RosterEntry {
            id: r.id("creature id")?,
            color: r.parse("creature color")?,
            fish_type: r.parse("creature type")?,
        })
    })
}

/// Reads one turn's snapshot.
pub fn read_snapshot<R>(reader: &mut TokenReader<R>) -> Result<TurnSnapshot, ProtocolError>
where
    R: io::BufRead,
{
    let my_score = reader.parse("my score")?;
    let foe_score = reader.parse("foe score")?;
    let my_scans = reader.list("my scan count", |r| r.id("scanned creature id"))?;
    let foe_scans = reader.list("foe scan count", |r| r.id("scanned creature id"))?;
    let my_drones = reader.list("my drone count", read_drone)?;
    let foe_drones = reader.list("foe drone count", read_drone)?;
    let drone_scans = reader.list("drone scan count", |r| {
        Ok(ScanReport {
            drone_id: r.id("drone id")?,
            creature_id: r.id("creature id")?,
        })
    })?;
    let visible = reader.list("visible creature count", |r| {
        Ok(VisibleCreature {
            id: r.id("creature id")?,
            position: r.point("creature position")?,
            velocity: r.point("creature velocity")?,
        })
    })?;
    let blips = reader.list("radar blip count", |r| {
        Ok(BlipReport {
            drone_id: r.id("drone id")?,
            creature_id: r.id("creature id")?,
            quadrant: r.token("radar quadrant")?.parse::<Quadrant>()?,
        })
    })?;

    Ok(TurnSnapshot {
        my_score,
        foe_score,
        my_scans,
        foe_scans,
        my_drones,
        foe_drones,
        drone_scans,
        visible,
        blips,
    })
}

fn read_drone<R>(reader: &mut TokenReader<R>) -> Result<DroneReport, ProtocolError>
where
    R: io::BufRead,
{
    Ok(DroneReport {
        id: reader.id("drone id")?,
        position: reader.point("drone position")?,
        emergency: reader.parse::<u8>("drone emergency flag")? != 0,
        battery: reader.parse("drone battery")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str) -> TokenReader<&[u8]> {
        TokenReader::new(input.as_bytes())
    }

    #[test]
    fn test_read_roster() {
        let mut r = reader("3\n4 0 0\n5 3 2\n16 -1 -1\n");
        let roster = read_roster(&mut r).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[1].id, EntityId(5));
        assert_eq!((roster[1].color, roster[1].fish_type), (3, 2));
        assert_eq!(roster[2].fish_type, -1);
        assert!(r.is_exhausted().unwrap());
    }

    #[test]
    fn test_read_snapshot() {
        let input = "\
            12\n7\n\
            1\n4\n\
            0\n\
            2\n0 2000 500 0 30\n2 8000 2600 1 24\n\
            1\n1 3000 500 0 30\n\
            1\n0 6\n\
            1\n16 5000 6000 -270 0\n\
            2\n0 5 BR\n2 5 BL\n";
        let snapshot = read_snapshot(&mut reader(input)).unwrap();

        assert_eq!(snapshot.my_score, 12);
        assert_eq!(snapshot.foe_score, 7);
        assert_eq!(snapshot.my_scans, vec![EntityId(4)]);
        assert!(snapshot.foe_scans.is_empty());
        assert_eq!(snapshot.my_drones.len(), 2);
        assert!(snapshot.my_drones[1].emergency);
        assert_eq!(snapshot.my_drones[1].battery, 24);
        assert_eq!(snapshot.foe_drones[0].position, Vec2::new(3_000, 500));
        assert_eq!(snapshot.drone_scans[0].creature_id, EntityId(6));
        assert_eq!(snapshot.visible[0].velocity, Vec2::new(-270, 0));
        assert_eq!(snapshot.blips[1].quadrant, Quadrant::BottomLeft);
    }

    #[test]
    fn test_tokens_may_span_lines() {
        let mut r = reader("1 4\n0 0");
        let roster = read_roster(&mut r).unwrap();
        assert_eq!(roster[0].id, EntityId(4));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            read_roster(&mut reader("2\n4 0 0\n")),
            Err(ProtocolError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            read_roster(&mut reader("x\n")),
            Err(ProtocolError::InvalidNumber {
                field: "creature count",
                ..
            })
        ));

        let bad_quadrant = "0 0 0 0 1 0 0 0 0 30 1 1 0 0 0 30 0 0 1 0 4 XX";
        assert!(matches!(
            read_snapshot(&mut reader(bad_quadrant)),
            Err(ProtocolError::Quadrant(_))
        ));
    }
}
