use std::str::FromStr;

use anyhow::bail;
use log::{debug, info};

use crate::game::config::Mansion;
use crate::game::ledger::ClueLedger;
use crate::game::tree::{Room, RoomId, Side};

/// A navigation decision made while exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Side),
    Stop,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" | "e" | "esquerda" => Ok(Command::Move(Side::Left)),
            "right" | "r" | "d" | "direita" => Ok(Command::Move(Side::Right)),
            "stop" | "s" | "sair" | "quit" => Ok(Command::Stop),
            other => bail!("'{other}' is not a direction (left, right or stop)"),
        }
    }
}

/// What the player saw on entering a room.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'m> {
    pub room: &'m Room,
    /// The clue lying in the room, if any.
    pub clue: Option<&'m str>,
    /// False when the clue was already in the ledger.
    pub new_clue: bool,
}

/// Outcome of a single exploring step.
#[derive(Debug, Clone, Copy)]
pub enum StepReport<'m> {
    Entered(Visit<'m>),
    /// There is no room on that side. Nothing changed.
    NoPassage(Side),
    Stopped,
}

/// Where the investigation stands after a step.
#[derive(Debug)]
pub enum Progress<'m> {
    Exploring(Investigation<'m>),
    Accusing(Accusation<'m>),
}

/// The exploring phase: a cursor into the mansion and the clues found so far.
#[derive(Debug)]
pub struct Investigation<'m> {
    mansion: &'m Mansion,
    cursor: RoomId,
    ledger: ClueLedger,
}

impl<'m> Investigation<'m> {
    /// Enter the mansion at its root room, recording the clue found there.
    /// A mansion made of a single room goes straight to the accusation.
    pub fn begin(mansion: &'m Mansion) -> (Progress<'m>, Visit<'m>) {
        let mut investigation = Self {
            mansion,
            cursor: mansion.rooms.root(),
            ledger: ClueLedger::new(),
        };
        info!("Investigation started in {}", investigation.current_room().name);

        let visit = investigation.record_current();
        (investigation.settle(), visit)
    }

    pub fn current_room(&self) -> &'m Room {
        self.mansion.rooms.room(self.cursor)
    }

    /// Directions that lead to another room.
    pub fn open_directions(&self) -> Vec<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .filter(|side| self.mansion.rooms.child(self.cursor, *side).is_some())
            .collect()
    }

    pub fn ledger(&self) -> &ClueLedger {
        &self.ledger
    }

    /// Apply one navigation decision.
    ///
    /// Moving toward a missing room is reported and leaves the state untouched.
    /// Exploring ends on `Stop` or when the new room has no way onward.
    pub fn advance(mut self, command: Command) -> (Progress<'m>, StepReport<'m>) {
        let side = match command {
            Command::Stop => {
                info!("Exploration stopped in {}", self.current_room().name);
                return (Progress::Accusing(self.close()), StepReport::Stopped);
            }
            Command::Move(side) => side,
        };

        let Some(next) = self.mansion.rooms.child(self.cursor, side) else {
            debug!("No {side} passage from {}", self.current_room().name);
            return (Progress::Exploring(self), StepReport::NoPassage(side));
        };

        self.cursor = next;
        let visit = self.record_current();
        (self.settle(), StepReport::Entered(visit))
    }

    fn record_current(&mut self) -> Visit<'m> {
        let room = self.current_room();
        info!("Entered {}", room.name);

        let clue = room.clue.as_deref();
        let new_clue = match clue {
            Some(text) => self.ledger.insert(text),
            None => false,
        };
        Visit {
            room,
            clue,
            new_clue,
        }
    }

    fn settle(self) -> Progress<'m> {
        if self.mansion.rooms.is_leaf(self.cursor) {
            info!("{} leads nowhere, exploration over", self.current_room().name);
            Progress::Accusing(self.close())
        } else {
            Progress::Exploring(self)
        }
    }

    fn close(self) -> Accusation<'m> {
        info!("Exploration finished with {} clue(s)", self.ledger.len());
        Accusation {
            mansion: self.mansion,
            final_room: self.cursor,
            ledger: self.ledger,
        }
    }
}

/// The accusing phase: the ledger is frozen and one suspect can be named.
#[derive(Debug)]
pub struct Accusation<'m> {
    mansion: &'m Mansion,
    final_room: RoomId,
    ledger: ClueLedger,
}

impl<'m> Accusation<'m> {
    pub fn ledger(&self) -> &ClueLedger {
        &self.ledger
    }

    pub fn final_room(&self) -> &'m Room {
        self.mansion.rooms.room(self.final_room)
    }

    /// Number of collected clues that implicate `suspect`.
    pub fn tally(&self, suspect: &str) -> usize {
        self.ledger
            .iter()
            .filter(|clue| {
                let implicated = self.mansion.suspects.lookup(clue);
                debug!("Clue '{clue}' implicates {implicated:?}");
                implicated == Some(suspect)
            })
            .count()
    }

    /// Tally for every configured suspect, in configuration order.
    pub fn tallies(&self) -> Vec<(&'m str, usize)> {
        self.mansion
            .suspects
            .suspects()
            .iter()
            .map(|name| (name.as_str(), self.tally(name)))
            .collect()
    }

    pub fn accuse(self, suspect: &str) -> Verdict {
        let tally = self.tally(suspect);
        let threshold = self.mansion.evidence_threshold;
        let outcome = if tally >= threshold {
            Outcome::Sufficient
        } else {
            Outcome::Insufficient
        };
        info!("Accused '{suspect}': {tally} clue(s), {outcome:?}");

        Verdict {
            accused: suspect.to_owned(),
            tally,
            threshold,
            outcome,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enough clues point at the accused: the player wins.
    Sufficient,
    Insufficient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accused: String,
    pub tally: usize,
    pub threshold: usize,
    pub outcome: Outcome,
}

impl Verdict {
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Sufficient
    }
}
