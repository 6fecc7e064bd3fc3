//! Storage layer for tripsplit
//!
//! Keeps the roster and the expense list in JSON files under the data
//! directory, with atomic writes and automatic directory creation.

pub mod expenses;
pub mod file_io;
pub mod members;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use members::MemberRepository;

use crate::config::paths::TripPaths;
use crate::error::{TripError, TripResult};
use crate::models::{Expense, Member};
use crate::ports::TripLedger;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TripPaths,
    pub members: MemberRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TripPaths) -> Result<Self, TripError> {
        paths.ensure_directories()?;

        Ok(Self {
            members: MemberRepository::new(paths.members_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &TripPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TripError> {
        self.members.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TripError> {
        self.members.save()?;
        self.expenses.save()?;
        Ok(())
    }
}

impl TripLedger for Storage {
    fn list_active_expenses(&self) -> TripResult<Vec<Expense>> {
        self.expenses.get_active()
    }

    fn list_roster_members(&self) -> TripResult<Vec<Member>> {
        self.members.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, ExpenseItem, MemberId, Money};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_ledger_view() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage.members.upsert(Member::new("a", "Ari")).unwrap();
        let mut done = Expense::new(
            "Done",
            MemberId::from("a"),
            Currency::Primary,
            vec![ExpenseItem::new("x", Money::from_units(1), vec![])],
        );
        done.set_settled(true);
        storage.expenses.upsert(done).unwrap();
        storage.save_all().unwrap();

        assert_eq!(storage.list_roster_members().unwrap().len(), 1);
        assert!(storage.list_active_expenses().unwrap().is_empty());
    }
}
