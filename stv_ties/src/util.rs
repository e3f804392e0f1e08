// Copyright 2021-2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

use std::hash::Hash;
use std::collections::{BTreeSet, HashSet};

/// A little utility to collect all unique values that pass by.
pub struct CollectAll<T:Ord> {
    all : BTreeSet<T>
}

impl <T:Ord> Default for CollectAll<T> {
    fn default() -> Self { CollectAll{ all: BTreeSet::default() } }
}

impl <T:Ord> CollectAll<T> {
    pub fn add(&mut self,t:T) { self.all.insert(t); }
    pub fn len(&self) -> usize { self.all.len() }
    pub fn is_empty(&self) -> bool { self.all.is_empty() }

    /// clear and return a sorted list of unique elements.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.all).into_iter().collect()
    }
}

impl<T:Ord> Extend<T> for CollectAll<T>
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) { self.all.extend(iter); }

}

impl<'a, T> Extend<&'a T> for CollectAll<T>
    where
        T: 'a + Copy + Ord,
{
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }

}

/// Remove all but the first of any elements with equal keys, otherwise keeping the order.
pub fn retain_first_occurrences<T,K:Eq+Hash,F:Fn(&T)->K>(list:&mut Vec<T>,key:F) {
    let mut seen : HashSet<K> = HashSet::new();
    list.retain(|e|seen.insert(key(e)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_all() {
        let mut collect = CollectAll::default();
        collect.add(3);
        collect.extend(&[1,3,2]);
        collect.extend(vec![5]);
        assert_eq!(4,collect.len());
        assert_eq!(vec![1,2,3,5],collect.take());
        assert!(collect.is_empty());
    }

    #[test]
    fn test_retain_first_occurrences() {
        let mut list = vec![(1,'a'),(2,'b'),(1,'c'),(3,'d'),(2,'e')];
        retain_first_occurrences(&mut list,|(k,_)|*k);
        assert_eq!(vec![(1,'a'),(2,'b'),(3,'d')],list);
    }
}
