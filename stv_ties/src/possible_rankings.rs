// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Find every full order of candidates (winner first, first excluded last) that can come
//! out of some way of resolving the ties for lowest candidate.
//!
//! Unlike finding winners, a majority does not stop the count; exclusions continue until
//! only one candidate is left, as the whole order is wanted.

use std::fmt::{Display, Formatter};
use std::iter;
use serde::{Deserialize,Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::options::{EnumerationError, EnumerationOptions};
use crate::profile::Profile;
use crate::tie_tree::{explore, EliminationHistory, TieBreakDecision, TieTreeStats, TieTreeVisitor};
use crate::util::{retain_first_occurrences, CollectAll};

/// One leaf of the tie break tree.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct PossibleRanking {
    /// order[0] is the winner, order.last() the first excluded.
    pub order : Vec<CandidateIndex>,
    /// The tie break decisions that lead to this order.
    pub decisions : Vec<TieBreakDecision>,
}

impl PossibleRanking {
    pub fn winner(&self) -> Option<CandidateIndex> { self.order.first().copied() }
}

impl Display for PossibleRanking {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.order.iter().map(|c|c.to_string()).collect::<Vec<_>>().join(">"))?;
        if !self.decisions.is_empty() {
            write!(f," ({})",self.decisions.iter().map(|d|d.to_string()).collect::<Vec<_>>().join("; "))?;
        }
        Ok(())
    }
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct PossibleRankings {
    /// One per leaf of the tie break tree, in the order explored.
    pub rankings : Vec<PossibleRanking>,
    pub stats : TieTreeStats,
}

impl PossibleRankings {
    pub fn orders(&self) -> Vec<Vec<CandidateIndex>> { self.rankings.iter().map(|r|r.order.clone()).collect() }
    /// Each order once, first occurrence first. As different tie breaks exclude different
    /// candidates in the round they differ, this is normally the same as orders().
    pub fn distinct_orders(&self) -> Vec<Vec<CandidateIndex>> {
        let mut orders = self.orders();
        retain_first_occurrences(&mut orders,|o|o.clone());
        orders
    }
    /// The distinct candidates at the top of some ranking, in index order.
    pub fn winners(&self) -> Vec<CandidateIndex> {
        let mut winners : CollectAll<CandidateIndex> = CollectAll::default();
        winners.extend(self.rankings.iter().filter_map(|r|r.winner()));
        winners.take()
    }
}

#[derive(Default)]
struct RankingCollector {
    rankings : Vec<PossibleRanking>,
}

impl TieTreeVisitor for RankingCollector {
    fn stop_at_majority(&self) -> bool { false }
    fn majority_winners(&mut self, _history: &EliminationHistory, _winners: &[CandidateIndex]) {}
    fn survivor(&mut self, history: EliminationHistory, survivor: CandidateIndex) {
        let order = iter::once(survivor).chain(history.excluded.iter().rev().cloned()).collect();
        self.rankings.push(PossibleRanking{ order, decisions: history.decisions });
    }
}

/// Find the order from every leaf of the tie break tree.
pub fn possible_rankings(profile:&Profile,options:&EnumerationOptions) -> Result<PossibleRankings,EnumerationError> {
    let mut collector = RankingCollector::default();
    let stats = explore(profile,options,&mut collector)?;
    Ok(PossibleRankings{ rankings: collector.rankings, stats })
}

/// Every full order, winner first, with the default options (one per leaf of the tie break tree).
/// ```
/// use stv_ties::ballot_metadata::{lettered_candidates, CandidateIndex};
/// use stv_ties::profile::Profile;
/// use stv_ties::possible_rankings::enumerate_rankings;
/// let profile = Profile::new(lettered_candidates(3),vec!["3*0,1,2".parse().unwrap(),"2*1,2,0".parse().unwrap(),"4*2,0,1".parse().unwrap()]).unwrap();
/// assert_eq!(vec![vec![CandidateIndex(2),CandidateIndex(0),CandidateIndex(1)]],enumerate_rankings(&profile).unwrap());
/// ```
pub fn enumerate_rankings(profile:&Profile) -> Result<Vec<Vec<CandidateIndex>>,EnumerationError> {
    Ok(possible_rankings(profile,&EnumerationOptions::default())?.orders())
}
