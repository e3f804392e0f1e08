// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Information about the contest, such as candidates.

use serde::{Serialize,Deserialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// a candidate, referred to by position in the candidate list, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl FromStr for CandidateIndex {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(CandidateIndex(s.trim().parse()?)) }
}

/// A number of candidates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct NumberOfCandidates(pub usize);

impl fmt::Display for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

impl NumberOfCandidates {
    /// All the candidates, in index order.
    pub fn all(self) -> impl Iterator<Item=CandidateIndex> { (0..self.0).map(CandidateIndex) }
}

/// information about a candidate in the contest.
#[derive(Debug,Serialize,Deserialize,Clone,PartialEq,Eq)]
pub struct Candidate {
    pub name : String,
}

impl Candidate {
    pub fn from_name(name:&str) -> Self { Candidate{ name: name.to_string() } }
}

/// Make candidates "A", "B", ... for the first 26, then "C27", "C28" etc.
/// Useful for tests and synthetic profiles.
pub fn lettered_candidates(num_candidates:usize) -> Vec<Candidate> {
    (0..num_candidates).map(|i| if i<26 { Candidate::from_name(&((b'A'+i as u8) as char).to_string()) } else { Candidate{ name: format!("C{}",i+1) } }).collect()
}
