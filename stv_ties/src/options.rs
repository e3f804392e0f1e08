// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Choices about how to enumerate the outcomes.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use anyhow::anyhow;
use serde::{Deserialize,Serialize};
use thiserror::Error;
use crate::ballot_metadata::CandidateIndex;

/// What a majority is a majority of.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum MajorityDenominator {
    /// The sum of every continuing candidate's tally this round.
    /// A vote that ties several candidates at its top continuing position counts once for each of them.
    #[default]
    AllTallies,
    /// The number of votes that reach some continuing candidate. A vote tied between
    /// several continuing candidates counts once, even though each of them gets its value.
    /// This makes it possible for more than one candidate to have a majority.
    ContributingBallots,
}

/// What to do if more than one candidate has a majority in the same round.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum MajorityTieResolution {
    /// Refuse to produce a result.
    #[default]
    Reject,
    /// Every candidate with a majority is a possible winner of that branch.
    AllWin,
}

/// Options controlling enumeration of possible outcomes.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub struct EnumerationOptions {
    #[serde(default)]
    pub majority_denominator : MajorityDenominator,
    #[serde(default)]
    pub majority_tie : MajorityTieResolution,
    /// If present, give up if the tie break tree has more than this many leaves.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub max_branches : Option<usize>,
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum EnumerationError {
    #[error("Candidates {candidates:?} simultaneously have a majority")]
    AmbiguousMajorityTie{candidates:Vec<CandidateIndex>},
    #[error("More than {limit} tie break branches")]
    TooManyBranches{limit:usize},
}

impl Display for MajorityDenominator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MajorityDenominator::AllTallies => write!(f,"AllTallies"),
            MajorityDenominator::ContributingBallots => write!(f,"ContributingBallots"),
        }
    }
}

impl FromStr for MajorityDenominator {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AllTallies" => Ok(MajorityDenominator::AllTallies),
            "ContributingBallots" => Ok(MajorityDenominator::ContributingBallots),
            _ => Err(anyhow!("Not a valid majority denominator : {}",s)),
        }
    }
}

impl Display for MajorityTieResolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MajorityTieResolution::Reject => write!(f,"Reject"),
            MajorityTieResolution::AllWin => write!(f,"AllWin"),
        }
    }
}

impl FromStr for MajorityTieResolution {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Reject" => Ok(MajorityTieResolution::Reject),
            "AllWin" => Ok(MajorityTieResolution::AllWin),
            _ => Err(anyhow!("Not a valid majority tie resolution : {}",s)),
        }
    }
}
