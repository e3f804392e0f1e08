// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Find every candidate who could win, for some way of resolving the ties that come up.

use serde::{Deserialize,Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::options::{EnumerationError, EnumerationOptions};
use crate::profile::Profile;
use crate::tie_tree::{explore, EliminationHistory, TieTreeStats, TieTreeVisitor};
use crate::util::CollectAll;

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct PossibleWinners {
    /// Everyone who wins in at least one branch, in index order.
    pub winners : Vec<CandidateIndex>,
    pub stats : TieTreeStats,
}

impl PossibleWinners {
    /// true if ties don't matter for who wins.
    pub fn is_unique(&self) -> bool { self.winners.len()==1 }
}

#[derive(Default)]
struct WinnerCollector {
    winners : CollectAll<CandidateIndex>,
}

impl TieTreeVisitor for WinnerCollector {
    fn stop_at_majority(&self) -> bool { true }
    fn majority_winners(&mut self, _history: &EliminationHistory, winners: &[CandidateIndex]) { self.winners.extend(winners); }
    // A branch can get down to one candidate without anyone having had a majority (e.g. a final 1:1 tie). The survivor wins.
    fn survivor(&mut self, _history: EliminationHistory, survivor: CandidateIndex) { self.winners.add(survivor); }
}

/// Find everyone who wins in some branch of the tie break tree. A branch stops as soon as someone has a majority.
pub fn possible_winners(profile:&Profile,options:&EnumerationOptions) -> Result<PossibleWinners,EnumerationError> {
    let mut collector = WinnerCollector::default();
    let stats = explore(profile,options,&mut collector)?;
    Ok(PossibleWinners{ winners: collector.winners.take(), stats })
}

/// Everyone who could win, with the default options.
/// ```
/// use stv_ties::ballot_metadata::{lettered_candidates, CandidateIndex};
/// use stv_ties::profile::Profile;
/// use stv_ties::possible_winners::enumerate_winners;
/// let cycle = Profile::new(lettered_candidates(3),vec!["1*0,1,2".parse().unwrap(),"1*1,2,0".parse().unwrap(),"1*2,0,1".parse().unwrap()]).unwrap();
/// assert_eq!(vec![CandidateIndex(0),CandidateIndex(1),CandidateIndex(2)],enumerate_winners(&cycle).unwrap());
/// ```
pub fn enumerate_winners(profile:&Profile) -> Result<Vec<CandidateIndex>,EnumerationError> {
    Ok(possible_winners(profile,&EnumerationOptions::default())?.winners)
}
