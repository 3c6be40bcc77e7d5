//! Allowed collision matrix deciding which link pairs are checked for distance.

use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use crate::kinematic_traits::LinksPair;

/// Entry of the allowed collision matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedCollision {
    /// The pair may touch, the distance is never computed.
    AlwaysAllowed,
    /// The distance between the pair must be computed on every query.
    MustCheck,
}

/// Symmetric matrix over link names. The matrix is only ever built as a whole, from
/// the white list or the black list, and never patched afterwards.
///
/// Link names are kept sorted, so the enumeration of pairs is lexicographic and the
/// first link of every enumerated pair is the lexicographically smaller one.
#[derive(Debug, Clone)]
pub struct AllowedCollisionMatrix {
    names: Vec<String>,
    index: HashMap<String, usize>,
    entries: Vec<AllowedCollision>,
}

impl AllowedCollisionMatrix {
    fn new<I: IntoIterator<Item = String>>(names: I, default: AllowedCollision) -> Self {
        let names: Vec<String> = names.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let index = names.iter().enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let n = names.len();
        AllowedCollisionMatrix {
            names,
            index,
            entries: vec![default; n * n],
        }
    }

    /// Only the given pairs are checked (if both links have collision shapes), all other pairs
    /// are allowed. Disabled pairs are allowed even if white listed.
    pub fn from_whitelist<I, F>(
        names: I,
        has_shape: F,
        whitelist: &[LinksPair],
        disabled: &[LinksPair],
    ) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> bool,
    {
        let mut matrix = Self::new(names, AllowedCollision::AlwaysAllowed);
        for (a, b) in whitelist {
            if has_shape(a) && has_shape(b) {
                matrix.set_entry(a, b, AllowedCollision::MustCheck);
            } else {
                debug!("White listed pair {} - {} ignored, not both links have shapes", a, b);
            }
        }
        matrix.disable(disabled);
        matrix
    }

    /// All pairs of links with collision shapes are checked, except the black listed and
    /// the disabled pairs.
    pub fn from_blacklist<I, F>(
        names: I,
        has_shape: F,
        blacklist: &[LinksPair],
        disabled: &[LinksPair],
    ) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> bool,
    {
        let mut matrix = Self::new(names, AllowedCollision::AlwaysAllowed);
        let shaped: Vec<usize> = (0..matrix.names.len())
            .filter(|&i| has_shape(&matrix.names[i]))
            .collect();
        for (k, &i) in shaped.iter().enumerate() {
            for &j in &shaped[k + 1..] {
                matrix.set(i, j, AllowedCollision::MustCheck);
            }
        }
        for (a, b) in blacklist {
            matrix.set_entry(a, b, AllowedCollision::AlwaysAllowed);
        }
        matrix.disable(disabled);
        matrix
    }

    fn disable(&mut self, disabled: &[LinksPair]) {
        for (a, b) in disabled {
            self.set_entry(a, b, AllowedCollision::AlwaysAllowed);
        }
    }

    fn set(&mut self, i: usize, j: usize, value: AllowedCollision) {
        let n = self.names.len();
        self.entries[i * n + j] = value;
        self.entries[j * n + i] = value;
    }

    fn set_entry(&mut self, a: &str, b: &str, value: AllowedCollision) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) if i != j => {
                self.set(i, j, value);
                true
            }
            _ => {
                debug!("Pair {} - {} is not in the allowed collision matrix", a, b);
                false
            }
        }
    }

    /// Entry for the pair, regardless of the order. None if any of the links is unknown,
    /// or both names are the same.
    pub fn entry(&self, a: &str, b: &str) -> Option<AllowedCollision> {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) if i != j => Some(self.entries[i * self.names.len() + j]),
            _ => None,
        }
    }

    /// All link names known to the matrix, sorted.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    /// Pairs that must be checked, each unordered pair once, in lexicographic order
    /// with the smaller name first.
    pub fn must_check_pairs(&self) -> Vec<(&str, &str)> {
        let n = self.names.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.entries[i * n + j] == AllowedCollision::MustCheck {
                    pairs.push((self.names[i].as_str(), self.names[j].as_str()));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["torso", "l_hand", "r_hand", "head", "pelvis"].iter().map(|s| s.to_string()).collect()
    }

    fn has_shape(name: &str) -> bool {
        name != "pelvis"
    }

    fn pair(a: &str, b: &str) -> LinksPair {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_whitelist_only_listed() {
        let matrix = AllowedCollisionMatrix::from_whitelist(
            names(), has_shape, &[pair("r_hand", "l_hand")], &[]);
        assert_eq!(matrix.must_check_pairs(), vec![("l_hand", "r_hand")]);
        assert_eq!(matrix.entry("r_hand", "l_hand"), Some(AllowedCollision::MustCheck));
        assert_eq!(matrix.entry("torso", "head"), Some(AllowedCollision::AlwaysAllowed));
    }

    #[test]
    fn test_whitelist_ignores_shapeless_and_unknown() {
        let matrix = AllowedCollisionMatrix::from_whitelist(
            names(), has_shape, &[pair("pelvis", "torso"), pair("ghost", "torso")], &[]);
        assert!(matrix.must_check_pairs().is_empty());
    }

    #[test]
    fn test_blacklist_checks_all_shaped_pairs() {
        let matrix = AllowedCollisionMatrix::from_blacklist(
            names(), has_shape, &[pair("torso", "head")], &[]);
        let pairs = matrix.must_check_pairs();
        // 4 shaped links give 6 pairs, one black listed
        assert_eq!(pairs.len(), 5);
        assert!(!pairs.contains(&("head", "torso")));
        assert!(pairs.iter().all(|(a, b)| *a != "pelvis" && *b != "pelvis"));
        assert!(pairs.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn test_disabled_pairs_win() {
        let disabled = [pair("l_hand", "r_hand")];
        let white = AllowedCollisionMatrix::from_whitelist(
            names(), has_shape, &[pair("l_hand", "r_hand")], &disabled);
        assert!(white.must_check_pairs().is_empty());

        let black = AllowedCollisionMatrix::from_blacklist(names(), has_shape, &[], &disabled);
        assert_eq!(black.entry("r_hand", "l_hand"), Some(AllowedCollision::AlwaysAllowed));
        assert_eq!(black.must_check_pairs().len(), 5);
    }

    #[test]
    fn test_pairs_are_lexicographic() {
        let matrix = AllowedCollisionMatrix::from_blacklist(names(), has_shape, &[], &[]);
        let pairs = matrix.must_check_pairs();
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs, sorted);
        assert_eq!(matrix.entry_names()[0], "head");
    }

    #[test]
    fn test_self_pair_has_no_entry() {
        let matrix = AllowedCollisionMatrix::from_blacklist(names(), has_shape, &[], &[]);
        assert_eq!(matrix.entry("torso", "torso"), None);
    }
}
