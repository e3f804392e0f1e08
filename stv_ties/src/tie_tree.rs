// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Walk every way of resolving ties for lowest candidate.
//!
//! Rather than resolving a tie by some rule (lot, countback, reverse donkey vote...),
//! every candidate in the tie is excluded in its own branch. Each branch carries its
//! own copy of the exclusions so far; branches never share mutable state.
//!
//! What happens at the end of a branch, and whether a majority ends a branch early,
//! is up to a [TieTreeVisitor].

use std::fmt::{Display, Formatter};
use serde::{Deserialize,Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::options::{EnumerationError, EnumerationOptions, MajorityTieResolution};
use crate::profile::Profile;
use crate::round::{Majority, RoundEvaluator, RoundOutcome};

/// A choice made in one branch about which of several tied lowest candidates to exclude.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct TieBreakDecision {
    /// The round the tie came up in, 1 being the first round.
    pub round : usize,
    /// Everyone in the tie, in index order.
    pub tied : Vec<CandidateIndex>,
    /// The one excluded in this branch.
    pub chosen : CandidateIndex,
}

impl Display for TieBreakDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"Round {}: excluded {:?} from tie {:?}",self.round,self.chosen,self.tied)
    }
}

/// The exclusions made so far in one branch.
#[derive(Debug,Clone,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct EliminationHistory {
    /// Excluded candidates, earliest first. No duplicates.
    pub excluded : Vec<CandidateIndex>,
    /// The tie break decisions made to get here, earliest first.
    pub decisions : Vec<TieBreakDecision>,
}

impl EliminationHistory {
    /// The round about to be counted, 1 being the first.
    pub fn current_round(&self) -> usize { self.excluded.len()+1 }

    fn exclude(&mut self,candidate:CandidateIndex) { self.excluded.push(candidate); }

    /// Make a new branch where `chosen` is excluded from `tied`.
    fn fork(&self,tied:&[CandidateIndex],chosen:CandidateIndex) -> Self {
        let mut res = self.clone();
        res.decisions.push(TieBreakDecision{ round: self.current_round(), tied: tied.to_vec(), chosen });
        res.exclude(chosen);
        res
    }
}

/// Summary of the size of the tree explored.
#[derive(Debug,Clone,Copy,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct TieTreeStats {
    /// Number of branches that reached an end (a majority or a sole survivor).
    pub leaves : usize,
    /// Number of times a tie split a branch.
    pub forks : usize,
    /// Number of rounds counted, over all branches.
    pub rounds_evaluated : usize,
}

/// Decides how branches end and gathers up whatever is wanted from them.
pub trait TieTreeVisitor {
    /// If true, a branch stops as soon as some candidate has a majority.
    fn stop_at_majority(&self) -> bool;
    /// Called when a branch stops because of a majority. Only called if stop_at_majority() is true.
    /// If more than one is given, they tied for majority and the options said all of them win.
    fn majority_winners(&mut self,history:&EliminationHistory,winners:&[CandidateIndex]);
    /// Called when a branch has excluded all but one candidate.
    fn survivor(&mut self,history:EliminationHistory,survivor:CandidateIndex);
}

/// Explore the whole tie break tree for the profile depth first.
/// When a tie forks a branch, the branch excluding the lowest index candidate is explored first.
///
/// If nobody voted, there is nothing to explore and the visitor is never called.
pub fn explore<V:TieTreeVisitor>(profile:&Profile,options:&EnumerationOptions,visitor:&mut V) -> Result<TieTreeStats,EnumerationError> {
    let mut stats = TieTreeStats::default();
    if profile.is_empty_electorate() { return Ok(stats); }
    let evaluator = RoundEvaluator::new(profile,options.majority_denominator);
    let check_branch_limit = |leaves:usize| match options.max_branches {
        Some(limit) if leaves>limit => Err(EnumerationError::TooManyBranches{limit}),
        _ => Ok(()),
    };
    let mut pending : Vec<EliminationHistory> = vec![EliminationHistory::default()];
    stats.leaves=1; // counts branches, finished or not. Each branch ends in exactly one leaf.
    check_branch_limit(stats.leaves)?;
    while let Some(mut history) = pending.pop() {
        loop {
            match evaluator.evaluate(&history.excluded) {
                RoundOutcome::Terminal{survivor} => {
                    visitor.survivor(history,survivor);
                    break;
                }
                RoundOutcome::NoVotes => break, // only if the profile changed under us, which it can't.
                RoundOutcome::Counted(result) => {
                    stats.rounds_evaluated+=1;
                    if visitor.stop_at_majority() {
                        let winners = match result.majority {
                            Majority::None => vec![],
                            Majority::Unique(winner) => vec![winner],
                            Majority::Tied(tied) => match options.majority_tie {
                                MajorityTieResolution::Reject => return Err(EnumerationError::AmbiguousMajorityTie{candidates:tied}),
                                MajorityTieResolution::AllWin => tied,
                            },
                        };
                        if !winners.is_empty() {
                            visitor.majority_winners(&history,&winners);
                            break;
                        }
                    }
                    let lowest = result.lowest;
                    if lowest.len()==1 {
                        history.exclude(lowest[0]);
                    } else {
                        stats.forks+=1;
                        stats.leaves+=lowest.len()-1;
                        check_branch_limit(stats.leaves)?;
                        tracing::debug!(round=history.current_round(),tied=?lowest,"Tie for lowest, forking");
                        // push in reverse so the lowest index comes off the stack first.
                        for &chosen in lowest[1..].iter().rev() {
                            pending.push(history.fork(&lowest,chosen));
                        }
                        history=history.fork(&lowest,lowest[0]);
                    }
                }
            }
        }
    }
    tracing::debug!(leaves=stats.leaves,forks=stats.forks,rounds=stats.rounds_evaluated,"Explored tie break tree");
    Ok(stats)
}
