// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! A (possibly tied) preference order over all candidates, and how many people cast it.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;
use serde::{Deserialize,Serialize};
use thiserror::Error;
use crate::ballot_metadata::CandidateIndex;

/// A ranking of candidates. Several candidates may share a rank position.
#[derive(Clone,Debug,Serialize,Deserialize,PartialEq,Eq)]
pub struct Preference {
    /// ranks[0] holds the candidates at rank position 1, the most preferred.
    /// More than one candidate in an entry means the voter ranked them equally.
    pub ranks : Vec<Vec<CandidateIndex>>,
    /// Number of people who voted in this way.
    pub n : usize,
}

impl Preference {
    /// A preference with no ties, most preferred first.
    pub fn strict(candidates:&[CandidateIndex],n:usize) -> Self {
        Preference{ ranks: candidates.iter().map(|c|vec![*c]).collect(), n }
    }

    /// Build from a candidate -> rank position map. Only the relative order of positions
    /// matters, so positions 1,3,3 are treated as 1,2,2.
    pub fn from_rank_map(rank_map:&HashMap<CandidateIndex,usize>,n:usize) -> Self {
        let mut by_position : Vec<(usize,CandidateIndex)> = rank_map.iter().map(|(c,p)|(*p,*c)).collect();
        by_position.sort();
        let mut ranks : Vec<Vec<CandidateIndex>> = vec![];
        let mut last_position : Option<usize> = None;
        for (position,candidate) in by_position {
            if last_position==Some(position) {
                if let Some(tied) = ranks.last_mut() { tied.push(candidate); }
            } else {
                ranks.push(vec![candidate]);
                last_position=Some(position);
            }
        }
        Preference{ranks,n}
    }

    /// The number of distinct rank positions used.
    pub fn num_positions(&self) -> usize { self.ranks.len() }

    /// The candidates at a given rank position, 1 being most preferred.
    /// Empty if the position is 0 or past the last position.
    pub fn candidates_at_rank(&self,position:usize) -> &[CandidateIndex] {
        if position==0 { &[] } else { self.ranks.get(position-1).map(|v|v.as_slice()).unwrap_or(&[]) }
    }

    /// The rank position of a candidate, 1 being most preferred.
    pub fn rank_of(&self,candidate:CandidateIndex) -> Option<usize> {
        self.ranks.iter().position(|tied|tied.contains(&candidate)).map(|i|i+1)
    }

    /// candidate -> rank position, 1 being most preferred.
    pub fn rank_map(&self) -> HashMap<CandidateIndex,usize> {
        let mut res = HashMap::new();
        for (i,tied) in self.ranks.iter().enumerate() {
            for &c in tied { res.insert(c,i+1); }
        }
        res
    }

    /// All candidates mentioned, most preferred first.
    pub fn candidates(&self) -> impl Iterator<Item=CandidateIndex> + '_ {
        self.ranks.iter().flat_map(|tied|tied.iter().cloned())
    }

    /// Find the most preferred rank position that contains at least one continuing candidate.
    /// Returns the position (1 based) and everyone at that position, continuing or not.
    /// None if the vote is exhausted.
    pub fn top_continuing<F:Fn(CandidateIndex)->bool>(&self,is_continuing:F) -> Option<(usize,&[CandidateIndex])> {
        self.ranks.iter().enumerate().find(|(_,tied)|tied.iter().any(|&c|is_continuing(c))).map(|(i,tied)|(i+1,tied.as_slice()))
    }

    /// Same preference with each tied group sorted, so that equal preferences compare equal.
    pub fn canonical(&self) -> Self {
        Preference{ ranks: self.ranks.iter().map(|tied|{ let mut tied = tied.clone(); tied.sort(); tied }).collect(), n: self.n }
    }
}

/// Text form `n*a,b,c` where n is the number of voters and a,b,c candidate indices, most preferred first.
/// Candidates ranked equally are put in braces, e.g. `3*0,{1,2}` means 3 voters put candidate 0 first and tied 1 and 2 for second.
impl Display for Preference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}*",self.n)?;
        for (i,tied) in self.ranks.iter().enumerate() {
            if i>0 { write!(f,",")?; }
            if tied.len()==1 { write!(f,"{}",tied[0])?; }
            else { write!(f,"{{{}}}",tied.iter().map(|c|c.to_string()).collect::<Vec<_>>().join(","))?; }
        }
        Ok(())
    }
}

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ParsePreferenceError {
    #[error("Expecting n*preferences, no * found")]
    NoTimes,
    #[error("Could not parse integer : {0}")]
    NotInteger(#[from] ParseIntError),
    #[error("Unbalanced braces in preference list")]
    UnbalancedBraces,
    #[error("Empty rank position in preference list")]
    EmptyPosition,
}

impl FromStr for Preference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (n,prefs) = s.split_once('*').ok_or(ParsePreferenceError::NoTimes)?;
        let n : usize = n.trim().parse()?;
        let mut ranks : Vec<Vec<CandidateIndex>> = vec![];
        let prefs = prefs.trim();
        if prefs.is_empty() { return Ok(Preference{ranks,n}); }
        // candidates seen so far inside an unfinished {...} group.
        let mut group : Option<Vec<CandidateIndex>> = None;
        for field in prefs.split(',') {
            let field = field.trim();
            let (opens,field) = match field.strip_prefix('{') { Some(rest) => (true,rest), None => (false,field) };
            let (closes,field) = match field.strip_suffix('}') { Some(rest) => (true,rest), None => (false,field) };
            if field.is_empty() { return Err(ParsePreferenceError::EmptyPosition); }
            let candidate : CandidateIndex = field.parse()?;
            if opens {
                if group.is_some() { return Err(ParsePreferenceError::UnbalancedBraces); }
                group = Some(vec![]);
            }
            match group.take() {
                Some(mut tied) => {
                    tied.push(candidate);
                    if closes { ranks.push(tied); } else { group=Some(tied); }
                }
                None => {
                    if closes { return Err(ParsePreferenceError::UnbalancedBraces); }
                    ranks.push(vec![candidate]);
                }
            }
        }
        if group.is_some() { return Err(ParsePreferenceError::UnbalancedBraces); }
        Ok(Preference{ranks,n})
    }
}

/// A utility for building up a preference list and merging duplicate votes.
#[derive(Default)]
pub struct UniquePreferenceBuilder {
    preferences : HashMap<Vec<Vec<CandidateIndex>>,usize>,
}

impl UniquePreferenceBuilder {
    /// Add a single vote with a given ranking
    pub fn add(&mut self,ranks:Vec<Vec<CandidateIndex>>) {
        self.add_vote(Preference{ ranks, n: 1 });
    }
    pub fn add_vote(&mut self,vote:Preference) {
        let vote = vote.canonical();
        *self.preferences.entry(vote.ranks).or_insert(0)+=vote.n;
    }
    /// Convert to a list of preferences, sorted by ranking so the result is repeatable.
    pub fn to_preferences(self) -> Vec<Preference> {
        let mut res : Vec<Preference> = self.preferences.into_iter().map(|(ranks,n)|Preference{ ranks, n }).collect();
        res.sort_by(|a,b|a.ranks.cmp(&b.ranks));
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i:usize) -> CandidateIndex { CandidateIndex(i) }

    #[test]
    fn test_lookups() {
        let p : Preference = "4*2,{0,3},1".parse().unwrap();
        assert_eq!(4,p.n);
        assert_eq!(3,p.num_positions());
        assert_eq!(&[c(2)],p.candidates_at_rank(1));
        assert_eq!(&[c(0),c(3)],p.candidates_at_rank(2));
        assert_eq!(&[c(1)],p.candidates_at_rank(3));
        assert!(p.candidates_at_rank(0).is_empty());
        assert!(p.candidates_at_rank(4).is_empty());
        assert_eq!(Some(2),p.rank_of(c(3)));
        assert_eq!(Some(1),p.rank_of(c(2)));
        assert_eq!(None,p.rank_of(c(7)));
        assert_eq!(vec![c(2),c(0),c(3),c(1)],p.candidates().collect::<Vec<_>>());
        assert_eq!("4*2,{0,3},1",p.to_string());
    }

    #[test]
    fn test_rank_map_round_trip() {
        let p : Preference = "1*{1,0},2".parse().unwrap();
        let map = p.rank_map();
        assert_eq!(Some(&1),map.get(&c(0)));
        assert_eq!(Some(&1),map.get(&c(1)));
        assert_eq!(Some(&2),map.get(&c(2)));
        assert_eq!(p.canonical(),Preference::from_rank_map(&map,1));
        // gaps in positions are irrelevant.
        let gappy : HashMap<CandidateIndex,usize> = [(c(0),1),(c(1),5),(c(2),5)].into_iter().collect();
        assert_eq!("7*0,{1,2}",Preference::from_rank_map(&gappy,7).to_string());
    }

    #[test]
    fn test_top_continuing() {
        let p : Preference = "1*0,{1,2},3".parse().unwrap();
        assert_eq!(Some((1,&[c(0)][..])),p.top_continuing(|_|true));
        assert_eq!(Some((2,&[c(1),c(2)][..])),p.top_continuing(|x|x!=c(0)));
        assert_eq!(Some((2,&[c(1),c(2)][..])),p.top_continuing(|x|x==c(2)));
        assert_eq!(Some((3,&[c(3)][..])),p.top_continuing(|x|x==c(3)));
        assert_eq!(None,p.top_continuing(|_|false));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Err(ParsePreferenceError::NoTimes),"0,1".parse::<Preference>());
        assert_eq!(Err(ParsePreferenceError::UnbalancedBraces),"1*{0,1".parse::<Preference>());
        assert_eq!(Err(ParsePreferenceError::UnbalancedBraces),"1*0,1}".parse::<Preference>());
        assert_eq!(Err(ParsePreferenceError::EmptyPosition),"1*0,,1".parse::<Preference>());
        assert!(matches!("x*0".parse::<Preference>(),Err(ParsePreferenceError::NotInteger(_))));
        assert_eq!(Preference::strict(&[c(3)],2),"2*{3}".parse::<Preference>().unwrap());
    }

    #[test]
    fn test_unique_builder_merges_equivalent_ties() {
        let mut builder = UniquePreferenceBuilder::default();
        builder.add_vote("2*0,{1,2}".parse().unwrap());
        builder.add_vote("3*0,{2,1}".parse().unwrap());
        builder.add(vec![vec![c(1)],vec![c(0),c(2)]]);
        let merged = builder.to_preferences();
        assert_eq!(2,merged.len());
        assert_eq!("5*0,{1,2}",merged[0].to_string());
        assert_eq!("1*1,{0,2}",merged[1].to_string());
    }
}
