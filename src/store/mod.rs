use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Duration, Utc};
use derive_more::{Display, From};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::model::query::{NewQuery, Query, Topic};
use crate::model::user::User;

#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "IO error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "JSON error: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "Unknown employee id: {}", _0)]
    #[from(ignore)]
    UnknownEmployee(String),
}

impl std::error::Error for StoreError {}

struct StoreInner {
    users: Vec<User>,
    queries: Vec<Query>,
}

/// Flat-file record store backed by `users.json` and `queries.json`.
///
/// All mutations are write-through: the full collection is persisted to disk
/// before the in-memory state is updated, so a failed write leaves memory
/// untouched (all-or-nothing). The mutex serializes read-modify-write cycles
/// so id assignment and file writes cannot interleave.
pub struct KbStore {
    users_path: PathBuf,
    queries_path: PathBuf,
    inner: Mutex<StoreInner>,
}

impl KbStore {
    /// Load (or create) the backing files under `data_dir`.
    ///
    /// When a collection is empty and `seed_demo` is set, the demo fixture
    /// is written out so the portal is usable out of the box.
    pub fn init(data_dir: &Path, seed_demo: bool) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;

        let users_path = data_dir.join("users.json");
        let queries_path = data_dir.join("queries.json");

        let mut users: Vec<User> = load_collection(&users_path)?;
        let mut queries: Vec<Query> = load_collection(&queries_path)?;

        if users.is_empty() && seed_demo {
            users = seed_users();
            save_collection(&users_path, &users)?;
            info!(count = users.len(), "Seeded demo users");
        }

        if queries.is_empty() && seed_demo {
            queries = seed_queries();
            save_collection(&queries_path, &queries)?;
            info!(count = queries.len(), "Seeded demo queries");
        }

        Ok(Self {
            users_path,
            queries_path,
            inner: Mutex::new(StoreInner { users, queries }),
        })
    }

    // ---------- user operations ----------

    pub fn list_users(&self) -> Vec<User> {
        self.inner.lock().unwrap().users.clone()
    }

    pub fn find_user_by_employee_id(&self, employee_id: &str) -> Option<User> {
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.employee_id == employee_id)
            .cloned()
    }

    pub fn create_user(&self, employee_id: &str, password: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        let user = User {
            id: next_id(inner.users.iter().map(|u| u.id)),
            employee_id: employee_id.to_string(),
            password: password.to_string(),
        };

        let mut users = inner.users.clone();
        users.push(user.clone());
        save_collection(&self.users_path, &users)?;

        inner.users = users;
        Ok(user)
    }

    // ---------- query operations ----------

    /// All queries, newest first.
    pub fn list_queries(&self) -> Vec<Query> {
        let mut queries = self.queries_snapshot();
        queries.sort_by(|a, b| b.date.cmp(&a.date));
        queries
    }

    /// All queries in insertion order (the search engine sorts itself).
    pub fn queries_snapshot(&self) -> Vec<Query> {
        self.inner.lock().unwrap().queries.clone()
    }

    pub fn find_query_by_id(&self, id: u64) -> Option<Query> {
        self.inner
            .lock()
            .unwrap()
            .queries
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    /// Append a new query authored by `employee_id`, stamped with the
    /// current time and the next free id.
    pub fn append_query(&self, new: NewQuery, employee_id: &str) -> Result<Query, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        // Every query must reference an existing user at creation time.
        if !inner.users.iter().any(|u| u.employee_id == employee_id) {
            return Err(StoreError::UnknownEmployee(employee_id.to_string()));
        }

        let query = Query {
            id: next_id(inner.queries.iter().map(|q| q.id)),
            title: new.title,
            details: new.details,
            answer: new.answer,
            topic: new.topic,
            employee_id: employee_id.to_string(),
            date: Utc::now(),
        };

        let mut queries = inner.queries.clone();
        queries.push(query.clone());
        save_collection(&self.queries_path, &queries)?;

        inner.queries = queries;
        Ok(query)
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(&contents)?)
}

/// Write temp + rename so readers never observe a partially-written file.
fn save_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items)?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            employee_id: "E2301".to_string(),
            password: "Welcome@5432109".to_string(),
        },
        User {
            id: 2,
            employee_id: "E1856".to_string(),
            password: "password".to_string(),
        },
        User {
            id: 3,
            employee_id: "E1406".to_string(),
            password: "e1406".to_string(),
        },
    ]
}

fn seed_queries() -> Vec<Query> {
    let now = Utc::now();
    let last_month = now - Duration::days(30);

    vec![
        Query {
            id: 1,
            title: "How to configure the project deployment settings?".to_string(),
            details: "I'm trying to set up the deployment pipeline but can't find the right \
                      settings in the project configuration."
                .to_string(),
            answer: "Go to Project Settings > Deployment > Configuration. There you'll find all \
                     the necessary settings. Make sure to set the environment variables and \
                     deployment targets correctly."
                .to_string(),
            topic: Topic::Technical,
            employee_id: "E2301".to_string(),
            date: last_month,
        },
        Query {
            id: 2,
            title: "What's the process for requesting time off?".to_string(),
            details: "I need to take some vacation days next month but I'm not sure about the \
                      correct procedure."
                .to_string(),
            answer: "Submit your request through the HR portal at least 2 weeks in advance. \
                     Navigate to My Profile > Time Off > Request Time Off. Your manager will \
                     receive an automatic notification to approve your request."
                .to_string(),
            topic: Topic::Hr,
            employee_id: "E1856".to_string(),
            date: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_query(title: &str) -> NewQuery {
        NewQuery {
            title: title.to_string(),
            details: "details".to_string(),
            answer: "answer".to_string(),
            topic: Topic::Technical,
        }
    }

    #[test]
    fn seeds_demo_data_on_empty_dir() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), true).unwrap();

        assert_eq!(store.list_users().len(), 3);
        assert_eq!(store.queries_snapshot().len(), 2);
        assert!(dir.path().join("users.json").exists());
        assert!(dir.path().join("queries.json").exists());
    }

    #[test]
    fn no_seed_mode_starts_empty() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), false).unwrap();

        assert!(store.list_users().is_empty());
        assert!(store.queries_snapshot().is_empty());
    }

    #[test]
    fn seed_is_not_reapplied_over_existing_data() {
        let dir = tempdir().unwrap();
        {
            let store = KbStore::init(dir.path(), true).unwrap();
            store.create_user("E9999", "secret").unwrap();
        }

        let store = KbStore::init(dir.path(), true).unwrap();
        assert_eq!(store.list_users().len(), 4);
        assert!(store.find_user_by_employee_id("E9999").is_some());
    }

    #[test]
    fn append_query_assigns_monotonic_ids() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), true).unwrap();

        let first = store.append_query(new_query("first"), "E2301").unwrap();
        let second = store.append_query(new_query("second"), "E1856").unwrap();

        // Seed occupies ids 1 and 2.
        assert_eq!(first.id, 3);
        assert_eq!(second.id, 4);
        assert!(second.date >= first.date);
    }

    #[test]
    fn ids_survive_reload() {
        let dir = tempdir().unwrap();
        {
            let store = KbStore::init(dir.path(), true).unwrap();
            store.append_query(new_query("before reload"), "E2301").unwrap();
        }

        let store = KbStore::init(dir.path(), true).unwrap();
        let after = store.append_query(new_query("after reload"), "E2301").unwrap();
        assert_eq!(after.id, 4);
    }

    #[test]
    fn append_persists_before_returning() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), true).unwrap();
        let created = store.append_query(new_query("durable"), "E2301").unwrap();

        // A second store over the same files must see the record.
        let reread = KbStore::init(dir.path(), true).unwrap();
        let found = reread.find_query_by_id(created.id).unwrap();
        assert_eq!(found.title, "durable");
    }

    #[test]
    fn append_rejects_unknown_author() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), true).unwrap();

        let err = store.append_query(new_query("orphan"), "E0000").unwrap_err();
        assert!(matches!(err, StoreError::UnknownEmployee(_)));
        // In-memory state untouched.
        assert_eq!(store.queries_snapshot().len(), 2);
    }

    #[test]
    fn list_queries_is_newest_first() {
        let dir = tempdir().unwrap();
        let store = KbStore::init(dir.path(), true).unwrap();
        store.append_query(new_query("latest"), "E1406").unwrap();

        let listed = store.list_queries();
        assert_eq!(listed[0].title, "latest");
        for pair in listed.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn create_user_is_durable() {
        let dir = tempdir().unwrap();
        {
            let store = KbStore::init(dir.path(), false).unwrap();
            store.create_user("E1111", "pw").unwrap();
        }

        let store = KbStore::init(dir.path(), false).unwrap();
        let user = store.find_user_by_employee_id("E1111").unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.password, "pw");
    }
}
