//! Expense repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TripError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ExpenseId, Expense>>, TripError> {
        self.data
            .read()
            .map_err(|e| TripError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ExpenseId, Expense>>, TripError> {
        self.data
            .write()
            .map_err(|e| TripError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn load(&self) -> Result<(), TripError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), TripError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TripError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All expenses, oldest first
    pub fn get_all(&self) -> Result<Vec<Expense>, TripError> {
        let mut expenses: Vec<_> = self.read()?.values().cloned().collect();
        expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(expenses)
    }

    /// Expenses not yet marked settled, oldest first
    pub fn get_active(&self) -> Result<Vec<Expense>, TripError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| !e.is_settled)
            .collect())
    }

    /// Expenses whose id starts with the given prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Expense>, TripError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_prefix(prefix))
            .collect())
    }

    pub fn upsert(&self, expense: Expense) -> Result<(), TripError> {
        self.write()?.insert(expense.id, expense);
        Ok(())
    }

    pub fn delete(&self, id: ExpenseId) -> Result<bool, TripError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, TripError> {
        Ok(self.read()?.len())
    }
}
