//! Searches over the DACL of a security descriptor.
//!
//! Only access-allowed entries are considered. Results are keyed by SID; when
//! several entries grant rights to the same SID, their matches are merged.

use std::collections::BTreeMap;

use crate::Guid;
use crate::security::{ACE, AccessRight, SID, SecurityDescriptor};

impl SecurityDescriptor {
    /// Identities granted `right`.
    pub fn find_identities_with_right(&self, right: AccessRight) -> BTreeMap<SID, Vec<AccessRight>> {
        self.find_identities_with_any_right(&[right])
    }

    /// Identities granted at least one of `rights`, with the ones they were granted.
    pub fn find_identities_with_any_right(
        &self,
        rights: &[AccessRight],
    ) -> BTreeMap<SID, Vec<AccessRight>> {
        self.collect_matches(rights, false, ace_has_right)
    }

    /// Identities with a single entry granting all of `rights`.
    pub fn find_identities_with_all_rights(
        &self,
        rights: &[AccessRight],
    ) -> BTreeMap<SID, Vec<AccessRight>> {
        self.collect_matches(rights, true, ace_has_right)
    }

    /// Identities granted the extended right `guid`.
    pub fn find_identities_with_extended_right(&self, guid: &Guid) -> BTreeMap<SID, Vec<Guid>> {
        self.find_identities_with_any_extended_right(&[*guid])
    }

    pub fn find_identities_with_any_extended_right(
        &self,
        guids: &[Guid],
    ) -> BTreeMap<SID, Vec<Guid>> {
        self.collect_matches(guids, false, ace_has_extended_right)
    }

    /// Identities with a single entry matching all of `guids`.
    ///
    /// An entry names one object type, so this only matches when `guids`
    /// holds a single distinct GUID.
    pub fn find_identities_with_all_extended_rights(
        &self,
        guids: &[Guid],
    ) -> BTreeMap<SID, Vec<Guid>> {
        self.collect_matches(guids, true, ace_has_extended_right)
    }

    /// For each right in `expected`, the identities granted it that are not listed.
    ///
    /// Rights with no unexpected identity are left out.
    pub fn find_identities_with_unexpected_rights(
        &self,
        expected: &BTreeMap<AccessRight, Vec<SID>>,
    ) -> BTreeMap<AccessRight, Vec<SID>> {
        expected
            .iter()
            .filter_map(|(right, allowed)| {
                let unexpected = unexpected_sids(self.find_identities_with_right(*right), allowed);
                (!unexpected.is_empty()).then_some((*right, unexpected))
            })
            .collect()
    }

    /// For each extended right in `expected`, the identities granted it that are not listed.
    pub fn find_identities_with_unexpected_extended_rights(
        &self,
        expected: &BTreeMap<Guid, Vec<SID>>,
    ) -> BTreeMap<Guid, Vec<SID>> {
        expected
            .iter()
            .filter_map(|(guid, allowed)| {
                let unexpected =
                    unexpected_sids(self.find_identities_with_extended_right(guid), allowed);
                (!unexpected.is_empty()).then_some((*guid, unexpected))
            })
            .collect()
    }

    fn collect_matches<T: Copy + PartialEq>(
        &self,
        wanted: &[T],
        all: bool,
        matches: fn(&ACE, &T) -> bool,
    ) -> BTreeMap<SID, Vec<T>> {
        let mut found: BTreeMap<SID, Vec<T>> = BTreeMap::new();
        if wanted.is_empty() {
            return found;
        }
        let Some(dacl) = self.dacl() else {
            return found;
        };

        for ace in dacl.entries().iter().filter(|a| a.value.is_access_allowed()) {
            let Some(identity) = ace.identity() else {
                continue;
            };
            let matched = wanted
                .iter()
                .filter(|w| matches(ace, w))
                .copied()
                .collect::<Vec<_>>();
            if matched.is_empty() || (all && matched.len() != wanted.len()) {
                continue;
            }
            let entry = found.entry(identity.sid.clone()).or_default();
            for m in matched {
                if !entry.contains(&m) {
                    entry.push(m);
                }
            }
        }
        found
    }
}

fn ace_has_right(ace: &ACE, right: &AccessRight) -> bool {
    ace.access_mask().is_some_and(|mask| mask.has_right(*right))
}

fn ace_has_extended_right(ace: &ACE, guid: &Guid) -> bool {
    ace.object_type()
        .and_then(|object_type| object_type.object_type())
        .is_some_and(|object_type| object_type == guid)
}

fn unexpected_sids<T>(found: BTreeMap<SID, T>, allowed: &[SID]) -> Vec<SID> {
    found
        .into_keys()
        .filter(|sid| !allowed.contains(sid))
        .collect()
}
