//! The Monty Hall game.
//!
//! A prize is hidden behind one of three doors, the player selects a door and
//! the host opens one of the remaining doors that does not hide the prize.
//! The player may then stay with the selection or switch to the last closed door.

use std::fmt;

use probably_core::{DistError, Distribution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Door {
    A,
    B,
    C,
}

pub const DOORS: [Door; 3] = [Door::A, Door::B, Door::C];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub prize: Door,
    pub selected: Door,
    /// Door opened by the host, if any yet.
    pub open: Option<Door>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Winner,
    Loser,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Winner => write!(f, "winner"),
            Outcome::Loser => write!(f, "loser"),
        }
    }
}

fn doors_except(taken: &[Door]) -> Vec<Door> {
    DOORS.iter().copied().filter(|d| !taken.contains(d)).collect()
}

/// Prize hidden uniformly, door selected uniformly and independently.
pub fn hide_then_choose() -> Result<Distribution<State>, DistError> {
    let hide = Distribution::uniform(DOORS.iter().copied())?;
    let choose = Distribution::uniform(DOORS.iter().copied())?;
    Ok(hide.product_with(&choose, |&prize, &selected| State {
        prize,
        selected,
        open: None,
    }))
}

/// The host opens, uniformly, one of the doors neither hiding the prize nor selected.
pub fn opened() -> Result<Distribution<State>, DistError> {
    hide_then_choose()?.try_bind(|s| {
        let candidates = doors_except(&[s.prize, s.selected])
            .into_iter()
            .map(|d| State {
                open: Some(d),
                ..*s
            });
        Distribution::uniform(candidates).map(Some)
    })
}

pub fn stay(game: &Distribution<State>) -> Result<Distribution<State>, DistError> {
    Ok(game.clone())
}

/// Moves the selection to a closed door other than the current one.
pub fn switch(game: &Distribution<State>) -> Result<Distribution<State>, DistError> {
    game.try_bind(|s| {
        let mut taken = vec![s.selected];
        taken.extend(s.open);
        let candidates = doors_except(&taken).into_iter().map(|d| State {
            selected: d,
            ..*s
        });
        Distribution::uniform(candidates).map(Some)
    })
}

pub fn winner(game: &Distribution<State>) -> Distribution<Outcome> {
    game.map(|s| {
        if s.prize == s.selected {
            Outcome::Winner
        } else {
            Outcome::Loser
        }
    })
}
