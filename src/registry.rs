use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{Member, Value, schema::KeySlot};

type Index = HashMap<Value, usize>;

/// The ordered members of one enumeration type.
///
/// Reverse indices from a key's value to a member are built on first lookup
/// by that key and dropped whenever the member list changes. The cache sits
/// behind a reader-writer lock so a registry that is no longer being written
/// can be shared across threads.
#[derive(Debug, Default)]
pub struct Registry {
    members: Vec<Arc<Member>>,
    sealed: bool,
    indices: RwLock<HashMap<KeySlot, Arc<Index>>>,
}

impl Registry {
    /// Number of registered members.
    pub fn len(&self) -> usize { self.members.len() }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Member>> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Arc<Member>] { &self.members }

    /// Whether the registry was replaced by a batch registration and closed.
    pub fn is_sealed(&self) -> bool { self.sealed }

    pub(crate) fn push(&mut self, member: Arc<Member>) {
        self.members.push(member);
        self.invalidate();
    }

    pub(crate) fn seal_with(&mut self, members: Vec<Arc<Member>>) {
        self.members = members;
        self.sealed = true;
        self.invalidate();
    }

    pub(crate) fn find(
        &self,
        slot: KeySlot,
        value: &Value,
    ) -> Option<&Arc<Member>> {
        let index = self.index(slot);
        index.get(value).map(|&position| &self.members[position])
    }

    fn index(&self, slot: KeySlot) -> Arc<Index> {
        if let Some(index) = self
            .indices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&slot)
        {
            return index.clone();
        }

        let built: Index = self
            .members
            .iter()
            .enumerate()
            .map(|(position, member)| (slot.value_of(member).clone(), position))
            .collect();
        self.indices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(slot)
            .or_insert_with(|| Arc::new(built))
            .clone()
    }

    fn invalidate(&mut self) {
        self.indices
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            sealed: self.sealed,
            indices: RwLock::default(),
        }
    }
}
