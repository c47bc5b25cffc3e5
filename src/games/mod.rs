//! Game implementations built on the board engine.

pub mod skirmish;
