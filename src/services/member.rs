//! Member service
//!
//! Roster management: adding, renaming and removing trip members.

use tracing::info;

use crate::error::{TripError, TripResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for roster management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member to the roster
    pub fn add(&self, id: &str, display_name: &str) -> TripResult<Member> {
        let member = Member::new(id.trim(), display_name.trim());
        member
            .validate()
            .map_err(|e| TripError::Validation(e.to_string()))?;

        if self.storage.members.get(&member.id)?.is_some() {
            return Err(TripError::Duplicate {
                entity_type: "Member",
                identifier: member.id.to_string(),
            });
        }
        if self.storage.members.name_exists(&member.display_name, None)? {
            return Err(TripError::Duplicate {
                entity_type: "Member",
                identifier: member.display_name.clone(),
            });
        }

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        info!(member = %member.id, name = %member.display_name, "added member");
        Ok(member)
    }

    /// Find a member by id, falling back to display name
    pub fn find(&self, identifier: &str) -> TripResult<Option<Member>> {
        let identifier = identifier.trim();
        if let Some(member) = self.storage.members.get(&MemberId::from(identifier))? {
            return Ok(Some(member));
        }
        self.storage.members.get_by_name(identifier)
    }

    /// Like [`find`](Self::find), but a missing member is an error
    pub fn resolve(&self, identifier: &str) -> TripResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| TripError::member_not_found(identifier))
    }

    /// The roster, in join order
    pub fn list(&self) -> TripResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Change a member's display name
    pub fn rename(&self, id: &MemberId, new_name: &str) -> TripResult<Member> {
        let mut member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| TripError::member_not_found(id.as_str()))?;

        let new_name = new_name.trim();
        if self.storage.members.name_exists(new_name, Some(id))? {
            return Err(TripError::Duplicate {
                entity_type: "Member",
                identifier: new_name.to_string(),
            });
        }

        member.display_name = new_name.to_string();
        member
            .validate()
            .map_err(|e| TripError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;
        Ok(member)
    }

    /// Remove a member who is not part of any unsettled expense
    pub fn remove(&self, id: &MemberId) -> TripResult<Member> {
        let member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| TripError::member_not_found(id.as_str()))?;

        let in_use = self
            .storage
            .expenses
            .get_active()?
            .iter()
            .filter(|e| e.involves(id))
            .count();
        if in_use > 0 {
            return Err(TripError::MemberInUse {
                member: member.display_name,
                count: in_use,
            });
        }

        self.storage.members.delete(id)?;
        self.storage.members.save()?;

        info!(member = %id, "removed member");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TripPaths;
    use crate::models::{Currency, Expense, ExpenseItem, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let member = service.add("u1", " Mina ").unwrap();
        assert_eq!(member.display_name, "Mina");

        assert!(service.find("u1").unwrap().is_some());
        assert!(service.find("mina").unwrap().is_some());
        assert!(service.find("nobody").unwrap().is_none());
        assert!(service.resolve("nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicates_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.add("u1", "Mina").unwrap();

        assert!(matches!(
            service.add("u1", "Other"),
            Err(TripError::Duplicate { .. })
        ));
        assert!(matches!(
            service.add("u2", "MINA"),
            Err(TripError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        assert!(service.add("u1", "  ").unwrap_err().is_validation());
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.add("u1", "Mina").unwrap();
        service.add("u2", "Joon").unwrap();

        let renamed = service.rename(&MemberId::from("u1"), "Minah").unwrap();
        assert_eq!(renamed.display_name, "Minah");
        assert!(service.rename(&MemberId::from("u1"), "joon").is_err());
    }

    #[test]
    fn test_remove_refuses_member_in_use() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.add("u1", "Mina").unwrap();
        service.add("u2", "Joon").unwrap();

        let mut expense = Expense::new(
            "Coffee",
            MemberId::from("u1"),
            Currency::Primary,
            vec![ExpenseItem::new(
                "Latte",
                Money::from_units(5),
                vec![MemberId::from("u2")],
            )],
        );
        storage.expenses.upsert(expense.clone()).unwrap();

        assert!(matches!(
            service.remove(&MemberId::from("u2")),
            Err(TripError::MemberInUse { count: 1, .. })
        ));

        expense.set_settled(true);
        storage.expenses.upsert(expense).unwrap();
        assert!(service.remove(&MemberId::from("u2")).is_ok());
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
