// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

use stv_ties::ballot_metadata::{lettered_candidates, CandidateIndex};
use stv_ties::options::EnumerationOptions;
use stv_ties::possible_rankings::{enumerate_rankings, possible_rankings};
use stv_ties::preference::Preference;
use stv_ties::profile::Profile;
use stv_ties::tie_tree::{TieBreakDecision, TieTreeStats};

fn c(i:usize) -> CandidateIndex { CandidateIndex(i) }

fn profile(num_candidates:usize,votes:&[&str]) -> Profile {
    Profile::new(lettered_candidates(num_candidates),votes.iter().map(|v|v.parse::<Preference>().unwrap()).collect()).unwrap()
}

#[test]
fn test_ranking_without_ties() {
    let profile = profile(3,&["3*0,1,2","2*1,2,0","4*2,0,1"]);
    assert_eq!(vec![vec![c(2),c(0),c(1)]],enumerate_rankings(&profile).unwrap());
    let rankings = possible_rankings(&profile,&EnumerationOptions::default()).unwrap();
    assert!(rankings.rankings[0].decisions.is_empty());
    assert_eq!("C > A > B",profile.describe_order(&rankings.rankings[0].order));
    assert_eq!("2>0>1",rankings.rankings[0].to_string());
}

#[test]
fn test_three_way_cycle_gives_three_rankings() {
    let profile = profile(3,&["1*0,1,2","1*1,2,0","1*2,0,1"]);
    let rankings = possible_rankings(&profile,&EnumerationOptions::default()).unwrap();
    assert_eq!(3,rankings.rankings.len());
    assert_eq!(vec![vec![c(1),c(2),c(0)],vec![c(2),c(0),c(1)],vec![c(0),c(1),c(2)]],rankings.orders());
    assert_eq!(rankings.orders(),rankings.distinct_orders());
    assert_eq!(vec![c(0),c(1),c(2)],rankings.winners());
    for (ranking,chosen) in rankings.rankings.iter().zip([c(0),c(1),c(2)]) {
        assert_eq!(vec![TieBreakDecision{ round: 1, tied: vec![c(0),c(1),c(2)], chosen }],ranking.decisions);
    }
    assert_eq!("1>2>0 (Round 1: excluded #0 from tie [#0, #1, #2])",rankings.rankings[0].to_string());
}

#[test]
fn test_majority_does_not_stop_ranking() {
    // A has a majority straight away, but the order of B, C and D depends on ties.
    let profile = profile(4,&["6*0,1,2,3","2*1,2,3,0","1*2,3,1,0","1*3,2,1,0"]);
    let rankings = possible_rankings(&profile,&EnumerationOptions::default()).unwrap();
    assert_eq!(vec![
        vec![c(0),c(3),c(1),c(2)],
        vec![c(0),c(1),c(3),c(2)],
        vec![c(0),c(2),c(1),c(3)],
        vec![c(0),c(1),c(2),c(3)],
    ],rankings.orders());
    assert_eq!(TieTreeStats{ leaves: 4, forks: 3, rounds_evaluated: 7 },rankings.stats);
    assert_eq!(vec![c(0)],rankings.winners());
    let second = &rankings.rankings[1];
    assert_eq!(vec![
        TieBreakDecision{ round: 1, tied: vec![c(2),c(3)], chosen: c(2) },
        TieBreakDecision{ round: 2, tied: vec![c(1),c(3)], chosen: c(3) },
    ],second.decisions);
}

#[test]
fn test_degenerate_profiles() {
    assert_eq!(vec![vec![c(0)]],enumerate_rankings(&profile(1,&["2*0"])).unwrap());
    assert!(enumerate_rankings(&profile(4,&[])).unwrap().is_empty());
    let rankings = possible_rankings(&profile(4,&[]),&EnumerationOptions::default()).unwrap();
    assert_eq!(TieTreeStats::default(),rankings.stats);
    assert!(rankings.winners().is_empty());
}

#[test]
fn test_ranking_serializes() {
    let profile = profile(2,&["1*0,1","1*1,0"]);
    let rankings = possible_rankings(&profile,&EnumerationOptions::default()).unwrap();
    let json = serde_json::to_string(&rankings.rankings[0]).unwrap();
    assert_eq!(r#"{"order":[1,0],"decisions":[{"round":1,"tied":[0,1],"chosen":0}]}"#,json);
}
