//! Expense service
//!
//! Create, look up, delete and settle expenses. This is the boundary where
//! typed input is validated; the settlement computation only ever reads the
//! stored records.

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{TripError, TripResult};
use crate::models::{Currency, Expense, ExpenseId, ExpenseItem, MemberId, Money, NormalizeError};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub payer_id: MemberId,
    pub currency: Currency,
    pub items: Vec<ExpenseItem>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Record a new expense
    ///
    /// Payer and participants must be on the roster and every item needs at
    /// least one participant.
    pub fn create(&self, input: NewExpense) -> TripResult<Expense> {
        if self.storage.members.get(&input.payer_id)?.is_none() {
            return Err(TripError::member_not_found(input.payer_id.as_str()));
        }

        let mut items = input.items;
        for item in items.iter_mut() {
            item.dedup_participants();
            if item.is_unsplit() {
                return Err(TripError::Validation(format!(
                    "Item '{}' has no participants",
                    item.label
                )));
            }
            for participant in &item.participant_ids {
                if self.storage.members.get(participant)?.is_none() {
                    return Err(TripError::member_not_found(participant.as_str()));
                }
            }
        }

        let mut expense = Expense::new(input.title.trim(), input.payer_id, input.currency, items);
        expense
            .validate()
            .map_err(|e| TripError::Validation(e.to_string()))?;
        expense.total_amount = Some(self.normalized_total(&expense)?);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(expense = %expense.id, title = %expense.title, "created expense");
        Ok(expense)
    }

    /// Total of an expense in the settlement currency
    pub fn normalized_total(&self, expense: &Expense) -> TripResult<Money> {
        let rate = self.settings.exchange_rate;
        let mut total = Money::ZERO;
        for item in &expense.items {
            let amount = rate.normalize(item.amount, &expense.currency)?;
            total = total
                .checked_add(amount)
                .ok_or(NormalizeError::Overflow(amount))?;
        }
        Ok(total)
    }

    pub fn get(&self, id: ExpenseId) -> TripResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full id or unambiguous id prefix
    pub fn find(&self, identifier: &str) -> TripResult<Expense> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(expense);
            }
        }

        let mut matches = self.storage.expenses.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Err(TripError::expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(TripError::Validation(format!(
                "'{}' matches {} expenses; use a longer id",
                identifier, n
            ))),
        }
    }

    pub fn list(&self, include_settled: bool) -> TripResult<Vec<Expense>> {
        if include_settled {
            self.storage.expenses.get_all()
        } else {
            self.storage.expenses.get_active()
        }
    }

    pub fn delete(&self, id: ExpenseId) -> TripResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| TripError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        info!(expense = %id, "deleted expense");
        Ok(expense)
    }

    /// Mark an expense settled or active again
    pub fn set_settled(&self, id: ExpenseId, settled: bool) -> TripResult<Expense> {
        self.update(id, |expense| expense.set_settled(settled))
    }

    /// Flip the settled flag
    pub fn toggle_settled(&self, id: ExpenseId) -> TripResult<Expense> {
        self.update(id, |expense| {
            expense.toggle_settled();
        })
    }

    fn update(&self, id: ExpenseId, change: impl FnOnce(&mut Expense)) -> TripResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| TripError::expense_not_found(id.to_string()))?;

        change(&mut expense);
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        debug!(expense = %id, settled = expense.is_settled, "updated expense");
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TripPaths;
    use crate::models::Member;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage.members.upsert(Member::new("a", "Ari")).unwrap();
        storage.members.upsert(Member::new("b", "Bo")).unwrap();
        (temp_dir, storage)
    }

    fn lunch(currency: Currency, amount: Money) -> NewExpense {
        NewExpense {
            title: "Lunch".into(),
            payer_id: MemberId::from("a"),
            currency,
            items: vec![ExpenseItem::new(
                "Bibimbap",
                amount,
                vec![MemberId::from("a"), MemberId::from("b")],
            )],
        }
    }

    #[test]
    fn test_create_stores_normalized_total() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let expense = service
            .create(lunch(Currency::Secondary, Money::from_units(29_000)))
            .unwrap();

        assert_eq!(expense.total_amount, Some(Money::from_units(20)));
        assert_eq!(service.list(false).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_unknown_members() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let mut input = lunch(Currency::Primary, Money::from_units(10));
        input.payer_id = MemberId::from("zed");
        assert!(service.create(input).unwrap_err().is_not_found());

        let mut input = lunch(Currency::Primary, Money::from_units(10));
        input.items[0].participant_ids.push(MemberId::from("ghost"));
        assert!(service.create(input).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_rejects_unsplit_item() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let mut input = lunch(Currency::Primary, Money::from_units(10));
        input.items[0].participant_ids.clear();
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_create_rejects_overflowing_items() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let huge = Money::parse("50000000000000000000000000000").unwrap();
        let mut input = lunch(Currency::Primary, huge);
        input.items.push(ExpenseItem::new("Dessert", huge, vec![MemberId::from("b")]));

        assert!(service.create(input).unwrap_err().is_validation());
        assert!(service.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_normalized_total_reports_overflow() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let huge = Money::parse("50000000000000000000000000000").unwrap();
        let expense = Expense::new(
            "Yacht",
            MemberId::from("a"),
            Currency::Primary,
            vec![
                ExpenseItem::new("Hull", huge, vec![MemberId::from("a")]),
                ExpenseItem::new("Sails", huge, vec![MemberId::from("b")]),
            ],
        );

        assert!(matches!(
            service.normalized_total(&expense),
            Err(TripError::Currency(NormalizeError::Overflow(_)))
        ));
    }

    #[test]
    fn test_create_rejects_unknown_currency() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);

        let input = lunch(Currency::Unrecognized("EUR".into()), Money::from_units(10));
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_settle_and_toggle() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);
        let expense = service
            .create(lunch(Currency::Primary, Money::new(dec!(12.5))))
            .unwrap();

        let settled = service.set_settled(expense.id, true).unwrap();
        assert!(settled.is_settled);
        assert!(service.list(false).unwrap().is_empty());
        assert_eq!(service.list(true).unwrap().len(), 1);

        let toggled = service.toggle_settled(expense.id).unwrap();
        assert!(!toggled.is_settled);
    }

    #[test]
    fn test_find_by_prefix_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ExpenseService::new(&storage, &settings);
        let expense = service
            .create(lunch(Currency::Primary, Money::from_units(8)))
            .unwrap();

        let found = service.find(&expense.id.short()).unwrap();
        assert_eq!(found.id, expense.id);

        service.delete(expense.id).unwrap();
        assert!(service.find(&expense.id.to_string()).unwrap_err().is_not_found());
    }
}
