//! Page-lifetime record caches.
//!
//! A [`RecordCache`] holds the last loaded copy of one table in display
//! order. Mutations are applied locally after the remote call succeeds, and
//! every derived view goes through [`RecordCache::query`], which never
//! touches the stored order.

pub mod query;

pub use query::{
    EmployeeFilter, EmployeeSortKey, LogFilter, LogSortKey, Predicate, SortKey, SortValue,
};

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

use crate::domain::{DepartmentId, EmployeeId, LogEntryId, SortOrder};
use crate::models::{Department, Employee, LogEntry};

/// Anything the cache can hold.
pub trait Cached: Clone {
    type Key: Copy + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;
}

impl Cached for Employee {
    type Key = EmployeeId;

    fn key(&self) -> EmployeeId {
        self.id
    }
}

impl Cached for Department {
    type Key = DepartmentId;

    fn key(&self) -> DepartmentId {
        self.id
    }
}

impl Cached for LogEntry {
    type Key = LogEntryId;

    fn key(&self) -> LogEntryId {
        self.id
    }
}

/// Issued before a mutation is dispatched; orders its response against
/// every other mutation of the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct RecordCache<T: Cached> {
    items: Vec<T>,
    next_ticket: u64,
    applied: HashMap<T::Key, Ticket>,
}

impl<T: Cached> Default for RecordCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_ticket: 0,
            applied: HashMap::new(),
        }
    }
}

impl<T: Cached> RecordCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly loaded list, keeping its order.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn begin(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Replaces the entry with the same id in place, or appends.
    pub fn upsert(&mut self, item: T) {
        let ticket = self.begin();
        self.upsert_with(ticket, item);
    }

    /// Like [`upsert`](Self::upsert) but discarded when a later mutation of
    /// the same id has already been applied. Returns whether it was applied.
    pub fn upsert_with(&mut self, ticket: Ticket, item: T) -> bool {
        let key = item.key();
        if !self.claim(key, ticket) {
            return false;
        }

        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        true
    }

    /// Drops the entry with `key`; absent keys are a no-op.
    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        let ticket = self.begin();
        self.take(ticket, key)
    }

    pub fn remove_with(&mut self, ticket: Ticket, key: T::Key) -> bool {
        if !self.claim(key, ticket) {
            return false;
        }
        self.items.retain(|item| item.key() != key);
        true
    }

    fn take(&mut self, ticket: Ticket, key: T::Key) -> Option<T> {
        if !self.claim(key, ticket) {
            return None;
        }
        let index = self.items.iter().position(|item| item.key() == key)?;
        Some(self.items.remove(index))
    }

    fn claim(&mut self, key: T::Key, ticket: Ticket) -> bool {
        match self.applied.get(&key) {
            Some(latest) if *latest > ticket => {
                debug!(?key, ?ticket, ?latest, "Discarding stale cache update");
                false
            }
            _ => {
                self.applied.insert(key, ticket);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Matching entries, optionally sorted. Ties keep cache order.
    pub fn query<P, K>(&self, predicate: &P, sort: Option<(K, SortOrder)>) -> Vec<&T>
    where
        P: Predicate<T> + ?Sized,
        K: SortKey<T>,
    {
        let mut out: Vec<&T> = self
            .items
            .iter()
            .filter(|item| predicate.matches(item))
            .collect();
        if let Some((key, order)) = sort {
            query::sort_by(&mut out, key, order);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use chrono::NaiveDate;

    fn employee(id: i64, first: &str, last: &str) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            display_name: format!("{first} {last}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@co.com", first.to_lowercase()),
            phone: String::new(),
            position: "Engineer".to_string(),
            department_id: None,
            department_name: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            status: EmployeeStatus::Active,
            salary: 1000,
            manager: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(cache: &RecordCache<Employee>) -> Vec<i64> {
        cache.items().iter().map(|e| e.id.value()).collect()
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut cache = RecordCache::new();
        cache.replace_all(vec![employee(3, "A", "A"), employee(1, "B", "B")]);

        let mut edited = employee(3, "Z", "Z");
        edited.salary = 5;
        cache.upsert(edited);
        cache.upsert(employee(2, "C", "C"));
        cache.upsert(employee(2, "C", "D"));

        assert_eq!(ids(&cache), vec![3, 1, 2]);
        assert_eq!(cache.get(EmployeeId::new(3)).unwrap().salary, 5);
        assert_eq!(cache.get(EmployeeId::new(2)).unwrap().last_name, "D");
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut cache = RecordCache::new();
        cache.replace_all(vec![employee(1, "A", "A")]);
        assert!(cache.remove(EmployeeId::new(9)).is_none());
        assert_eq!(cache.len(), 1);
        assert!(cache.remove(EmployeeId::new(1)).is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn late_update_cannot_resurrect_deleted_record() {
        let mut cache = RecordCache::new();
        cache.replace_all(vec![employee(1, "A", "A")]);

        let edit = cache.begin();
        let delete = cache.begin();

        assert!(cache.remove_with(delete, EmployeeId::new(1)));
        assert!(!cache.upsert_with(edit, employee(1, "A", "Edited")));
        assert!(cache.is_empty());
    }

    #[test]
    fn late_update_cannot_overwrite_newer_edit() {
        let mut cache = RecordCache::new();
        cache.replace_all(vec![employee(1, "A", "A")]);

        let first = cache.begin();
        let second = cache.begin();

        assert!(cache.upsert_with(second, employee(1, "A", "Second")));
        assert!(!cache.upsert_with(first, employee(1, "A", "First")));
        assert_eq!(cache.get(EmployeeId::new(1)).unwrap().last_name, "Second");
    }

    #[test]
    fn query_does_not_mutate() {
        let mut cache = RecordCache::new();
        cache.replace_all(vec![
            employee(1, "Carl", "Smith"),
            employee(2, "Anna", "Jones"),
        ]);
        let sorted = cache.query(
            &|_: &Employee| true,
            Some((EmployeeSortKey::Name, SortOrder::Ascending)),
        );
        assert_eq!(sorted[0].first_name, "Anna");
        assert_eq!(ids(&cache), vec![1, 2]);
    }
}
