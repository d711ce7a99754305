use chrono::NaiveDate;
use lifeweeks_core::db::open_db_in_memory;
use lifeweeks_core::{
    memory_namespace_key, BirthDate, InMemoryKeyValueStore, KeyValueStore, KvError, KvResult,
    MemoryBook, MemoryChange, MemoryError, MemoryStore, SqliteKeyValueStore,
};
use std::cell::Cell;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn birth() -> BirthDate {
    BirthDate::parse("2000-01-15").unwrap()
}

/// Backend whose reads and/or writes always fail.
struct BrokenStore {
    fail_get: bool,
    fail_set: bool,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        if self.fail_get {
            return Err(KvError::Unavailable("read refused".to_string()));
        }
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        if self.fail_set {
            return Err(KvError::Unavailable("write refused".to_string()));
        }
        Ok(())
    }
}

/// In-memory backend whose next read fails once.
struct FlakyReadStore {
    inner: InMemoryKeyValueStore,
    fail_next_get: Cell<bool>,
}

impl KeyValueStore for FlakyReadStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        if self.fail_next_get.replace(false) {
            return Err(KvError::Unavailable("busy".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.inner.set(key, value)
    }
}

#[test]
fn saved_text_reloads_identically() {
    let backend = InMemoryKeyValueStore::new();
    let store = MemoryStore::new(&backend);
    let mut book = store.load(birth());

    let outcome = store.save_memory(birth(), &mut book, day(2024, 1, 20), "Graduation day");
    assert_eq!(outcome.change, MemoryChange::Stored);
    assert!(outcome.persisted());

    let reloaded = store.load(birth());
    assert_eq!(reloaded.get(day(2024, 1, 20)), Some("Graduation day"));
    assert_eq!(reloaded, book);
}

#[test]
fn empty_save_after_text_removes_memory() {
    let backend = InMemoryKeyValueStore::new();
    let store = MemoryStore::new(&backend);
    let mut book = MemoryBook::new();

    store.save_memory(birth(), &mut book, day(2024, 1, 20), "something");
    let outcome = store.save_memory(birth(), &mut book, day(2024, 1, 20), "   \n ");
    assert_eq!(outcome.change, MemoryChange::Removed);

    assert_eq!(store.memory_on(birth(), day(2024, 1, 20)), None);
    assert!(store.load(birth()).is_empty());
}

#[test]
fn persisted_blob_is_iso_keyed_json_under_namespaced_key() {
    let backend = InMemoryKeyValueStore::new();
    let store = MemoryStore::new(&backend);
    let mut book = MemoryBook::new();
    store.save_memory(birth(), &mut book, day(2024, 1, 20), "  padded  ");

    let raw = backend
        .get("life-weeks-memories-2000-01-15")
        .unwrap()
        .unwrap();
    assert_eq!(raw, r#"{"2024-01-20":"padded"}"#);
}

#[test]
fn memories_are_scoped_per_birth_date() {
    let backend = InMemoryKeyValueStore::new();
    let store = MemoryStore::new(&backend);
    let other = BirthDate::parse("1990-07-04").unwrap();
    let mut book = MemoryBook::new();
    store.save_memory(birth(), &mut book, day(2024, 1, 20), "mine");

    assert!(store.load(other).is_empty());
    assert_eq!(store.list(birth()).len(), 1);
}

#[test]
fn externally_written_blob_is_readable() {
    let backend = InMemoryKeyValueStore::new();
    backend
        .set(
            &memory_namespace_key(birth()),
            r#"{"2024-01-21":"later","2024-01-16":"earlier","2024-03-01":"spring"}"#,
        )
        .unwrap();
    let store = MemoryStore::new(&backend);

    let listed = store.list(birth());
    let dates: Vec<NaiveDate> = listed.iter().map(|(date, _)| *date).collect();
    assert_eq!(dates, vec![day(2024, 1, 16), day(2024, 1, 21), day(2024, 3, 1)]);
    assert_eq!(store.count_in_week(birth(), day(2024, 1, 15)), 2);
}

#[test]
fn malformed_blob_loads_as_empty() {
    let backend = InMemoryKeyValueStore::new();
    backend
        .set(&memory_namespace_key(birth()), "not json at all")
        .unwrap();
    let store = MemoryStore::new(&backend);

    assert!(matches!(
        store.try_load(birth()),
        Err(MemoryError::Malformed(_))
    ));
    assert!(store.load(birth()).is_empty());
}

#[test]
fn failed_read_loads_as_empty() {
    let store = MemoryStore::new(BrokenStore {
        fail_get: true,
        fail_set: false,
    });

    assert!(matches!(
        store.try_load(birth()),
        Err(MemoryError::Storage(_))
    ));
    assert!(store.load(birth()).is_empty());
}

#[test]
fn failed_write_keeps_local_change() {
    let store = MemoryStore::new(BrokenStore {
        fail_get: false,
        fail_set: true,
    });
    let mut book = MemoryBook::new();

    let outcome = store.save_memory(birth(), &mut book, day(2024, 1, 20), "kept locally");
    assert!(!outcome.persisted());
    assert!(matches!(outcome.persist_error, Some(MemoryError::Storage(_))));
    assert_eq!(book.get(day(2024, 1, 20)), Some("kept locally"));
}

#[test]
fn sqlite_backend_round_trips_memories() {
    let conn = open_db_in_memory().unwrap();
    let store = MemoryStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let mut book = MemoryBook::new();

    store.save_memory(birth(), &mut book, day(2024, 1, 20), "first");
    store.save_memory(birth(), &mut book, day(2024, 1, 22), "second");
    store.save_memory(birth(), &mut book, day(2024, 1, 20), "");

    let reloaded = store.load(birth());
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(day(2024, 1, 22)), Some("second"));
}

#[test]
fn save_one_refuses_to_overwrite_after_failed_read() {
    let backend = FlakyReadStore {
        inner: InMemoryKeyValueStore::new(),
        fail_next_get: Cell::new(false),
    };
    let seeded = r#"{"2001-01-01":"old","2010-05-05":"older"}"#;
    backend.set(&memory_namespace_key(birth()), seeded).unwrap();
    let store = MemoryStore::new(&backend);

    backend.fail_next_get.set(true);
    let result = store.save_one(birth(), day(2024, 1, 20), "new");
    assert!(matches!(result, Err(MemoryError::Storage(_))));
    assert_eq!(
        backend.get(&memory_namespace_key(birth())).unwrap().as_deref(),
        Some(seeded)
    );

    let outcome = store.save_one(birth(), day(2024, 1, 20), "new").unwrap();
    assert_eq!(outcome.change, MemoryChange::Stored);
    assert_eq!(store.list(birth()).len(), 3);
}

#[test]
fn save_one_refuses_to_overwrite_malformed_blob() {
    let backend = InMemoryKeyValueStore::new();
    backend
        .set(&memory_namespace_key(birth()), "{\"2024-01-20\":")
        .unwrap();
    let store = MemoryStore::new(&backend);

    let result = store.save_one(birth(), day(2024, 1, 21), "new");
    assert!(matches!(result, Err(MemoryError::Malformed(_))));
    assert_eq!(
        backend.get(&memory_namespace_key(birth())).unwrap().as_deref(),
        Some("{\"2024-01-20\":")
    );
}

#[test]
fn save_one_reports_write_failure() {
    let store = MemoryStore::new(BrokenStore {
        fail_get: false,
        fail_set: true,
    });

    let result = store.save_one(birth(), day(2024, 1, 20), "lost");
    assert!(matches!(result, Err(MemoryError::Storage(_))));
}

#[test]
fn blank_values_in_stored_blob_are_not_memories() {
    let backend = InMemoryKeyValueStore::new();
    backend
        .set(
            &memory_namespace_key(birth()),
            r#"{"2024-01-20":"","2024-01-21":"real"}"#,
        )
        .unwrap();
    let store = MemoryStore::new(&backend);

    assert_eq!(store.memory_on(birth(), day(2024, 1, 20)), None);
    assert_eq!(store.list(birth()).len(), 1);
    assert_eq!(store.count_in_week(birth(), day(2024, 1, 15)), 1);
}
