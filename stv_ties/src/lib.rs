// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Single winner STV (instant runoff) where ties for lowest candidate are not resolved by
//! any rule, but every possible resolution is followed. This lets one ask who could
//! possibly win, and what full orders of candidates could possibly come out, given the votes.
//!
//! ```
//! use stv_ties::ballot_metadata::{lettered_candidates, CandidateIndex};
//! use stv_ties::options::EnumerationOptions;
//! use stv_ties::profile::Profile;
//! use stv_ties::possible_rankings::possible_rankings;
//! use stv_ties::possible_winners::possible_winners;
//! let votes = vec!["1*0,1,2".parse().unwrap(),"1*1,2,0".parse().unwrap(),"1*2,0,1".parse().unwrap()];
//! let profile = Profile::new(lettered_candidates(3),votes).unwrap();
//! let options = EnumerationOptions::default();
//! let winners = possible_winners(&profile,&options).unwrap();
//! assert_eq!(3,winners.winners.len());
//! let rankings = possible_rankings(&profile,&options).unwrap();
//! assert_eq!(3,rankings.rankings.len());
//! assert_eq!("B > C > A",profile.describe_order(&rankings.rankings[0].order));
//! ```

pub mod ballot_metadata;
pub mod preference;
pub mod profile;
pub mod options;
pub mod round;
pub mod tie_tree;
pub mod possible_winners;
pub mod possible_rankings;
pub mod util;
