// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Count one round of a single winner STV (aka IRV) election.
//!
//! Each vote goes to the continuing candidate(s) at the most preferred rank position that
//! has any continuing candidate on it. If several continuing candidates share that position,
//! each of them gets the full value of the vote.

use serde::{Deserialize,Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::options::MajorityDenominator;
use crate::profile::Profile;

/// Who, if anyone, has a majority this round.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub enum Majority {
    None,
    Unique(CandidateIndex),
    /// More than one candidate has a majority. Only possible with [MajorityDenominator::ContributingBallots]
    Tied(Vec<CandidateIndex>),
}

impl Majority {
    /// Everyone with a majority, in index order.
    pub fn candidates(&self) -> Vec<CandidateIndex> {
        match self {
            Majority::None => vec![],
            Majority::Unique(c) => vec![*c],
            Majority::Tied(tied) => tied.clone(),
        }
    }
}

/// The tallies for one round, and what they imply.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct RoundResult {
    /// The tally for each continuing candidate, in index order. Candidates with no votes are present with a tally of 0.
    pub tallies : Vec<(CandidateIndex,usize)>,
    /// Sum of tallies. Can exceed contributing_ballots when votes tie candidates.
    pub total_tallies : usize,
    /// Number of votes that reached some continuing candidate.
    pub contributing_ballots : usize,
    pub majority : Majority,
    /// The candidates with the lowest tally, in index order. Never empty.
    pub lowest : Vec<CandidateIndex>,
}

impl RoundResult {
    pub fn tally(&self,candidate:CandidateIndex) -> Option<usize> {
        self.tallies.iter().find(|(c,_)|*c==candidate).map(|(_,t)|*t)
    }
    pub fn majority_winner(&self) -> Option<CandidateIndex> {
        if let Majority::Unique(c) = self.majority { Some(c) } else { None }
    }
}

/// The result of evaluating a round.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub enum RoundOutcome {
    /// Only one candidate is still continuing; no further exclusion is possible.
    Terminal{survivor:CandidateIndex},
    /// There were no votes to count (or no continuing candidates). Nothing to do.
    NoVotes,
    Counted(RoundResult),
}

/// Computes the tallies for a round, given who has already been excluded.
/// Holds no state between calls other than the profile and options.
pub struct RoundEvaluator<'a> {
    profile : &'a Profile,
    majority_denominator : MajorityDenominator,
}

impl <'a> RoundEvaluator<'a> {
    pub fn new(profile:&'a Profile,majority_denominator:MajorityDenominator) -> Self {
        RoundEvaluator{profile,majority_denominator}
    }

    /// Count a round with the given candidates already excluded (in any order).
    pub fn evaluate(&self,excluded:&[CandidateIndex]) -> RoundOutcome {
        let num_candidates = self.profile.num_candidates().0;
        let mut continuing = vec![true;num_candidates];
        for c in excluded { if c.0<num_candidates { continuing[c.0]=false; } }
        let continuing_candidates : Vec<CandidateIndex> = self.profile.candidate_universe().filter(|c|continuing[c.0]).collect();
        match continuing_candidates.len() {
            0 => return RoundOutcome::NoVotes,
            1 => return RoundOutcome::Terminal { survivor: continuing_candidates[0] },
            _ => {}
        }
        let mut tallies = vec![0usize;num_candidates];
        let mut contributing_ballots : usize = 0;
        for preference in self.profile.preferences() {
            if let Some((_,at_position)) = preference.top_continuing(|c|continuing[c.0]) {
                contributing_ballots=contributing_ballots.saturating_add(preference.n);
                for c in at_position {
                    if continuing[c.0] { tallies[c.0]=tallies[c.0].saturating_add(preference.n); }
                }
            }
        }
        let tallies : Vec<(CandidateIndex,usize)> = continuing_candidates.iter().map(|c|(*c,tallies[c.0])).collect();
        let total_tallies : usize = tallies.iter().fold(0,|sum,(_,t)|sum.saturating_add(*t));
        if total_tallies==0 { return RoundOutcome::NoVotes; }
        let denominator = match self.majority_denominator {
            MajorityDenominator::AllTallies => total_tallies,
            MajorityDenominator::ContributingBallots => contributing_ballots,
        };
        let mut max_tally = 0;
        let mut min_tally = usize::MAX;
        for (_,t) in &tallies {
            max_tally=max_tally.max(*t);
            min_tally=min_tally.min(*t);
        }
        // same as 2*max_tally>denominator, without overflow.
        let majority = if max_tally>denominator/2 {
            let with_majority : Vec<CandidateIndex> = tallies.iter().filter(|(_,t)|*t==max_tally).map(|(c,_)|*c).collect();
            if with_majority.len()==1 { Majority::Unique(with_majority[0]) } else { Majority::Tied(with_majority) }
        } else { Majority::None };
        let lowest : Vec<CandidateIndex> = tallies.iter().filter(|(_,t)|*t==min_tally).map(|(c,_)|*c).collect();
        tracing::trace!(excluded=?excluded,tallies=?tallies,majority=?majority,lowest=?lowest,"Evaluated round");
        RoundOutcome::Counted(RoundResult{tallies,total_tallies,contributing_ballots,majority,lowest})
    }
}

/// Convenience function to evaluate one round with the usual majority definition.
/// ```
/// use stv_ties::ballot_metadata::{lettered_candidates, CandidateIndex};
/// use stv_ties::profile::Profile;
/// use stv_ties::round::{evaluate_round, RoundOutcome};
/// let profile = Profile::new(lettered_candidates(3),vec!["3*0,1,2".parse().unwrap(),"2*1,2,0".parse().unwrap(),"4*2,0,1".parse().unwrap()]).unwrap();
/// if let RoundOutcome::Counted(result) = evaluate_round(&profile,&[]) {
///     assert_eq!(vec![CandidateIndex(1)],result.lowest);
///     assert_eq!(None,result.majority_winner());
/// } else { panic!("expected a count") }
/// if let RoundOutcome::Counted(result) = evaluate_round(&profile,&[CandidateIndex(1)]) {
///     assert_eq!(Some(6),result.tally(CandidateIndex(2)));
///     assert_eq!(Some(CandidateIndex(2)),result.majority_winner());
/// } else { panic!("expected a count") }
/// ```
pub fn evaluate_round(profile:&Profile,excluded:&[CandidateIndex]) -> RoundOutcome {
    RoundEvaluator::new(profile,MajorityDenominator::AllTallies).evaluate(excluded)
}
