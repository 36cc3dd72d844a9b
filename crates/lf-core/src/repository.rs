//! # Item Repository
//!
//! Thin accessor over an `ItemStore`. Every operation is a full
//! load-modify-save cycle; nothing is cached between calls, so each call
//! starts from whatever is persisted right now. Writers sharing one
//! repository (and its clones) are serialized; a separate process writing
//! the same slot still gets last-save-wins.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, Result};
use crate::models::Item;
use crate::traits::ItemStore;

#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<dyn ItemStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ItemRepository {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Held for a whole load-modify-save cycle.
    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::Internal("item store lock poisoned".into()))
    }

    /// Full reload of the persisted collection, in stored order.
    pub fn list(&self) -> Vec<Item> {
        self.store.load()
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.store.load().into_iter().find(|it| it.id == id)
    }

    /// Appends `item` to the persisted collection.
    pub fn add(&self, item: Item) -> Result<()> {
        let _guard = self.lock()?;
        let mut items = self.store.load();
        log::debug!("adding item {} ({} stored)", item.id, items.len());
        items.push(item);
        self.store.save(&items)
    }

    /// Applies `mutator` to the first item with `id` and persists.
    ///
    /// Returns `false` (and writes nothing) when no item matches.
    pub fn update_by_id<F>(&self, id: &str, mutator: F) -> Result<bool>
    where
        F: FnOnce(&mut Item),
    {
        let _guard = self.lock()?;
        let mut items = self.store.load();
        let Some(item) = items.iter_mut().find(|it| it.id == id) else {
            return Ok(false);
        };
        mutator(item);
        self.store.save(&items)?;
        Ok(true)
    }

    /// Removes every item with `id`. Returns `false` when none existed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let _guard = self.lock()?;
        let mut items = self.store.load();
        let before = items.len();
        items.retain(|it| it.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.store.save(&items)?;
        Ok(true)
    }

    /// Sets `resolved = true`. Resolution is one-way.
    pub fn mark_resolved(&self, id: &str) -> Result<bool> {
        self.update_by_id(id, |item| item.resolved = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryItemStore;
    use crate::models::ItemKind;

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: id.into(),
            kind: ItemKind::Lost,
            name: name.into(),
            category: "Electronics".into(),
            description: "black".into(),
            location: "Library".into(),
            date: "2024-03-10".into(),
            contact: "555-0100".into(),
            image: None,
            resolved: false,
            created_at: Some(10),
        }
    }

    fn setup() -> (Arc<MemoryItemStore>, ItemRepository) {
        let store = Arc::new(MemoryItemStore::new());
        let repo = ItemRepository::new(store.clone());
        (store, repo)
    }

    #[test]
    fn add_appends_in_order() {
        let (_, repo) = setup();
        repo.add(item("a", "Phone")).unwrap();
        repo.add(item("b", "Laptop")).unwrap();
        let ids: Vec<_> = repo.list().into_iter().map(|it| it.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn mark_resolved_touches_only_target() {
        let (_, repo) = setup();
        repo.add(item("a", "Phone")).unwrap();
        repo.add(item("b", "Laptop")).unwrap();

        assert!(repo.mark_resolved("a").unwrap());

        let items = repo.list();
        let mut expected_a = item("a", "Phone");
        expected_a.resolved = true;
        assert_eq!(items[0], expected_a);
        assert_eq!(items[1], item("b", "Laptop"));
    }

    #[test]
    fn update_unknown_id_writes_nothing() {
        let (store, repo) = setup();
        repo.add(item("a", "Phone")).unwrap();
        let before = store.raw();
        assert!(!repo.mark_resolved("zzz").unwrap());
        assert_eq!(store.raw(), before);
    }

    #[test]
    fn delete_removes_record() {
        let (_, repo) = setup();
        repo.add(item("a", "Phone")).unwrap();
        repo.add(item("b", "Laptop")).unwrap();
        assert!(repo.delete_by_id("a").unwrap());
        assert!(repo.get("a").is_none());
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn delete_unknown_id_is_byte_for_byte_noop() {
        let (store, repo) = setup();
        repo.add(item("a", "Phone")).unwrap();
        let before = store.raw();
        assert!(!repo.delete_by_id("missing").unwrap());
        assert_eq!(store.raw(), before);
    }

    #[test]
    fn noop_delete_keeps_corrupt_slot() {
        let store = Arc::new(MemoryItemStore::with_raw("garbage"));
        let repo = ItemRepository::new(store.clone());
        assert!(!repo.delete_by_id("x").unwrap());
        assert_eq!(store.raw().as_deref(), Some("garbage"));
    }

    #[test]
    fn add_over_corrupt_slot_starts_fresh() {
        let store = Arc::new(MemoryItemStore::with_raw("garbage"));
        let repo = ItemRepository::new(store);
        repo.add(item("a", "Phone")).unwrap();
        assert_eq!(repo.list(), vec![item("a", "Phone")]);
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let (_, repo) = setup();
        let workers: Vec<_> = (0..8)
            .map(|w| {
                let repo = repo.clone();
                std::thread::spawn(move || {
                    for n in 0..100 {
                        repo.add(item(&format!("{w}-{n}"), "Pen")).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(repo.list().len(), 800);
    }

    #[test]
    fn concurrent_resolves_and_deletes_do_not_resurrect() {
        let (_, repo) = setup();
        for n in 0..50 {
            repo.add(item(&n.to_string(), "Pen")).unwrap();
        }
        let deleter = {
            let repo = repo.clone();
            std::thread::spawn(move || {
                for n in (0..50).step_by(2) {
                    assert!(repo.delete_by_id(&n.to_string()).unwrap());
                }
            })
        };
        let resolver = {
            let repo = repo.clone();
            std::thread::spawn(move || {
                for n in (1..50).step_by(2) {
                    assert!(repo.mark_resolved(&n.to_string()).unwrap());
                }
            })
        };
        deleter.join().unwrap();
        resolver.join().unwrap();

        let items = repo.list();
        assert_eq!(items.len(), 25);
        assert!(items.iter().all(|it| it.resolved));
    }
}
