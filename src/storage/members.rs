//! Member repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TripError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for the trip roster
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<HashMap<MemberId, Member>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<MemberId, Member>>, TripError> {
        self.data
            .read()
            .map_err(|e| TripError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<MemberId, Member>>, TripError> {
        self.data
            .write()
            .map_err(|e| TripError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), TripError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for member in file_data.members {
            data.insert(member.id.clone(), member);
        }
        Ok(())
    }

    /// Save members to disk, in roster order
    pub fn save(&self) -> Result<(), TripError> {
        let file_data = MemberData {
            members: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: &MemberId) -> Result<Option<Member>, TripError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// All members in join order
    pub fn get_all(&self) -> Result<Vec<Member>, TripError> {
        let mut members: Vec<_> = self.read()?.values().cloned().collect();
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.cmp(&b.id)));
        Ok(members)
    }

    /// Get a member by display name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, TripError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|m| m.display_name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn upsert(&self, member: Member) -> Result<(), TripError> {
        self.write()?.insert(member.id.clone(), member);
        Ok(())
    }

    pub fn delete(&self, id: &MemberId) -> Result<bool, TripError> {
        Ok(self.write()?.remove(id).is_some())
    }

    /// Check if a display name is already taken by another member
    pub fn name_exists(&self, name: &str, exclude_id: Option<&MemberId>) -> Result<bool, TripError> {
        let name_lower = name.to_lowercase();
        Ok(self.read()?.values().any(|m| {
            m.display_name.to_lowercase() == name_lower && Some(&m.id) != exclude_id
        }))
    }

    pub fn count(&self) -> Result<usize, TripError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_roster_order_is_join_order() {
        let (_temp_dir, repo) = create_test_repo();
        let now = Utc::now();

        let mut late = Member::new("z", "Zoe");
        late.joined_at = now;
        let mut early = Member::new("y", "Yun");
        early.joined_at = now - Duration::minutes(5);

        repo.upsert(late).unwrap();
        repo.upsert(early).unwrap();

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|m| m.display_name)
            .collect();
        assert_eq!(names, vec!["Yun", "Zoe"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(Member::new("u1", "Mina")).unwrap();
        repo.save().unwrap();

        let repo2 = MemberRepository::new(temp_dir.path().join("members.json"));
        repo2.load().unwrap();
        let member = repo2.get(&MemberId::from("u1")).unwrap().unwrap();
        assert_eq!(member.display_name, "Mina");
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Member::new("u1", "Mina")).unwrap();

        assert!(repo.get_by_name("mina").unwrap().is_some());
        assert!(repo.name_exists("MINA", None).unwrap());
        assert!(!repo
            .name_exists("Mina", Some(&MemberId::from("u1")))
            .unwrap());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Member::new("u1", "Mina")).unwrap();
        assert!(repo.delete(&MemberId::from("u1")).unwrap());
        assert!(!repo.delete(&MemberId::from("u1")).unwrap());
    }
}
