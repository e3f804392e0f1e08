// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The set of votes cast in an election, checked for consistency.

use std::fs::File;
use std::path::Path;
use serde::{Deserialize,Serialize};
use thiserror::Error;
use crate::ballot_metadata::{Candidate, CandidateIndex, NumberOfCandidates};
use crate::preference::Preference;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum ProfileError {
    #[error("A profile needs at least one candidate")]
    NoCandidates,
    #[error("Ballot {ballot} is cast by zero voters")]
    ZeroCount{ballot:usize},
    #[error("Ballot {ballot} mentions candidate {candidate} but there are only {num_candidates} candidates")]
    CandidateOutOfRange{ballot:usize,candidate:CandidateIndex,num_candidates:usize},
    #[error("Ballot {ballot} mentions candidate {candidate} more than once")]
    RepeatedCandidate{ballot:usize,candidate:CandidateIndex},
    #[error("Ballot {ballot} ranks {covered} candidates, should rank all {num_candidates}")]
    MissingCandidates{ballot:usize,covered:usize,num_candidates:usize},
    #[error("Ballot {ballot} has no candidates at rank position {position}")]
    EmptyRankPosition{ballot:usize,position:usize},
}

/// The votes for an election, and the candidates they are over.
///
/// Every preference ranks every candidate exactly once (ties allowed), and is cast by at least one voter.
/// These conditions are checked on construction, including deserialization, and the profile is immutable afterwards.
#[derive(Debug,Serialize,Deserialize,Clone,PartialEq,Eq)]
#[serde(try_from = "UncheckedProfile")]
pub struct Profile {
    candidates : Vec<Candidate>,
    preferences : Vec<Preference>,
}

/// Serialized form of a profile, before checking.
#[derive(Deserialize)]
struct UncheckedProfile {
    candidates : Vec<Candidate>,
    preferences : Vec<Preference>,
}

impl TryFrom<UncheckedProfile> for Profile {
    type Error = ProfileError;
    fn try_from(value: UncheckedProfile) -> Result<Self, Self::Error> { Profile::new(value.candidates,value.preferences) }
}

impl Profile {
    /// Make a profile, checking that the preferences are consistent with the candidates.
    pub fn new(candidates:Vec<Candidate>,preferences:Vec<Preference>) -> Result<Self,ProfileError> {
        if candidates.is_empty() { return Err(ProfileError::NoCandidates); }
        let num_candidates = candidates.len();
        for (ballot,preference) in preferences.iter().enumerate() {
            check_preference(ballot,preference,num_candidates)?;
        }
        Ok(Profile{candidates,preferences})
    }

    pub fn num_candidates(&self) -> NumberOfCandidates { NumberOfCandidates(self.candidates.len()) }
    /// Every candidate that could appear, in index order.
    pub fn candidate_universe(&self) -> impl Iterator<Item=CandidateIndex> { self.num_candidates().all() }
    pub fn candidates(&self) -> &[Candidate] { &self.candidates }
    /// None if the candidate is not in this profile.
    pub fn candidate_name(&self,candidate:CandidateIndex) -> Option<&str> { self.candidates.get(candidate.0).map(|c|c.name.as_str()) }
    pub fn preferences(&self) -> &[Preference] { &self.preferences }
    /// Number of votes, counting each preference as many times as it was cast.
    pub fn num_votes(&self) -> usize { self.preferences.iter().map(|p|p.n).sum() }
    /// true if nobody voted.
    pub fn is_empty_electorate(&self) -> bool { self.preferences.is_empty() }

    /// Describe a list of candidates by name, e.g. "C > A > B". A candidate not in the profile is shown as "#n".
    pub fn describe_order(&self,order:&[CandidateIndex]) -> String {
        order.iter().map(|c|self.candidate_name(*c).map(|name|name.to_string()).unwrap_or_else(||format!("{:?}",c))).collect::<Vec<_>>().join(" > ")
    }

    /// Read a profile stored as JSON.
    pub fn load_json<P:AsRef<Path>>(path:P) -> anyhow::Result<Profile> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
    /// Store a profile as JSON.
    pub fn save_json<P:AsRef<Path>>(&self,path:P) -> anyhow::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(file,&self)?;
        Ok(())
    }
}

fn check_preference(ballot:usize,preference:&Preference,num_candidates:usize) -> Result<(),ProfileError> {
    if preference.n==0 { return Err(ProfileError::ZeroCount{ballot}); }
    let mut seen = vec![false;num_candidates];
    for (i,tied) in preference.ranks.iter().enumerate() {
        if tied.is_empty() { return Err(ProfileError::EmptyRankPosition{ballot,position:i+1}); }
        for &candidate in tied {
            if candidate.0>=num_candidates { return Err(ProfileError::CandidateOutOfRange{ballot,candidate,num_candidates}); }
            if seen[candidate.0] { return Err(ProfileError::RepeatedCandidate{ballot,candidate}); }
            seen[candidate.0]=true;
        }
    }
    let covered = seen.iter().filter(|s|**s).count();
    if covered!=num_candidates { return Err(ProfileError::MissingCandidates{ballot,covered,num_candidates}); }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot_metadata::lettered_candidates;

    fn prefs(votes:&[&str]) -> Vec<Preference> { votes.iter().map(|v|v.parse().unwrap()).collect() }

    #[test]
    fn test_valid_profile() {
        let profile = Profile::new(lettered_candidates(3),prefs(&["3*0,1,2","2*1,{0,2}"])).unwrap();
        assert_eq!(NumberOfCandidates(3),profile.num_candidates());
        assert_eq!(5,profile.num_votes());
        assert_eq!(Some("B"),profile.candidate_name(CandidateIndex(1)));
        assert_eq!(None,profile.candidate_name(CandidateIndex(3)));
        assert_eq!(lettered_candidates(3),profile.candidates());
        assert_eq!("C > A",profile.describe_order(&[CandidateIndex(2),CandidateIndex(0)]));
        assert_eq!("A > #7",profile.describe_order(&[CandidateIndex(0),CandidateIndex(7)]));
        assert_eq!(3,profile.candidate_universe().count());
        assert!(!profile.is_empty_electorate());
        assert!(Profile::new(lettered_candidates(3),vec![]).unwrap().is_empty_electorate());
    }

    #[test]
    fn test_malformed_profiles() {
        assert_eq!(Err(ProfileError::NoCandidates),Profile::new(vec![],vec![]));
        assert_eq!(Err(ProfileError::ZeroCount{ballot:1}),Profile::new(lettered_candidates(2),prefs(&["1*0,1","0*1,0"])));
        assert_eq!(Err(ProfileError::CandidateOutOfRange{ballot:0,candidate:CandidateIndex(2),num_candidates:2}),Profile::new(lettered_candidates(2),prefs(&["1*0,2"])));
        assert_eq!(Err(ProfileError::RepeatedCandidate{ballot:0,candidate:CandidateIndex(0)}),Profile::new(lettered_candidates(2),prefs(&["1*0,{1,0}"])));
        assert_eq!(Err(ProfileError::MissingCandidates{ballot:0,covered:2,num_candidates:3}),Profile::new(lettered_candidates(3),prefs(&["1*0,1"])));
        let empty_position = Preference{ ranks: vec![vec![CandidateIndex(0)],vec![],vec![CandidateIndex(1)]], n: 1 };
        assert_eq!(Err(ProfileError::EmptyRankPosition{ballot:0,position:2}),Profile::new(lettered_candidates(2),vec![empty_position]));
    }

    #[test]
    fn test_deserialization_is_checked() {
        let good = r#"{"candidates":[{"name":"A"},{"name":"B"}],"preferences":[{"ranks":[[0],[1]],"n":4}]}"#;
        let profile : Profile = serde_json::from_str(good).unwrap();
        assert_eq!(4,profile.num_votes());
        let missing = r#"{"candidates":[{"name":"A"},{"name":"B"}],"preferences":[{"ranks":[[0]],"n":4}]}"#;
        let err = serde_json::from_str::<Profile>(missing).unwrap_err();
        assert!(err.to_string().contains("should rank all 2"),"{}",err);
    }
}
