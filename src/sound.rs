// This file is part of the rookery library.
// Copyright (C) 2026 The rookery developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Audio notifications.
//!
//! The board never plays audio itself. It reports events to an optional
//! [`SoundSink`] installed with
//! [`Board::set_sound_sink()`](crate::Board::set_sound_sink).

use std::fmt;

/// Events worth a sound cue.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Sound {
    Move,
    Capture,
    Castle,
    Promote,
    Check,
    /// A click that was not a legal option.
    Illegal,
    GameEnd,
}

impl Sound {
    pub const fn name(self) -> &'static str {
        match self {
            Sound::Move => "move",
            Sound::Capture => "capture",
            Sound::Castle => "castle",
            Sound::Promote => "promote",
            Sound::Check => "check",
            Sound::Illegal => "illegal",
            Sound::GameEnd => "game-end",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver of [`Sound`] events.
pub trait SoundSink: fmt::Debug + Send + Sync {
    fn play_sound(&self, sound: Sound);
}
