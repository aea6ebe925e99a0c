//! Хранилище в памяти для тестов сервисов и маршрутов.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;

use super::{CompletedOrderStorage, LogisticsStorage, ProblemStorage};
use crate::models::{
    CompletedOrder, LogisticsEntry, NewCompletedOrder, NewLogisticsEntry, NewProblem, ProblemEntry,
};
use crate::{AppError, Result};

#[derive(Default)]
pub struct MemoryStorage {
    pub completed: Mutex<Vec<CompletedOrder>>,
    pub logistics: Mutex<Vec<LogisticsEntry>>,
    pub problems: Mutex<Vec<ProblemEntry>>,
    /// номера заказов, вставка которых завершается ошибкой
    pub failing_inserts: Mutex<HashSet<String>>,
    /// если true, проверка существования завершается ошибкой
    pub failing_lookups: Mutex<bool>,
}

fn poisoned<T>(_: T) -> AppError {
    AppError::DbError("хранилище недоступно".to_string())
}

impl MemoryStorage {
    pub fn fail_insert_of(&self, order_number: &str) {
        if let Ok(mut failing) = self.failing_inserts.lock() {
            failing.insert(order_number.to_string());
        }
    }
    pub fn fail_lookups(&self) {
        if let Ok(mut failing) = self.failing_lookups.lock() {
            *failing = true;
        }
    }
    pub fn completed_numbers(&self) -> Vec<String> {
        self.completed
            .lock()
            .map(|c| c.iter().map(|o| o.order_number.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl CompletedOrderStorage for MemoryStorage {
    async fn exists(&self, order_number: &str) -> Result<bool> {
        if *self.failing_lookups.lock().map_err(poisoned)? {
            return Err(AppError::DbError("lookup failed".to_string()));
        }
        let completed = self.completed.lock().map_err(poisoned)?;
        Ok(completed.iter().any(|o| o.order_number == order_number))
    }
    async fn insert(&self, order: &NewCompletedOrder) -> Result<bool> {
        if self
            .failing_inserts
            .lock()
            .map_err(poisoned)?
            .contains(&order.order_number)
        {
            return Err(AppError::DbError("insert failed".to_string()));
        }
        let mut completed = self.completed.lock().map_err(poisoned)?;
        if completed.iter().any(|o| o.order_number == order.order_number) {
            return Ok(false);
        }
        completed.push(CompletedOrder::from_new(order.clone()));
        Ok(true)
    }
    async fn get_all(&self) -> Result<Vec<CompletedOrder>> {
        let mut result = self.completed.lock().map_err(poisoned)?.clone();
        result.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(result)
    }
    async fn clear(&self) -> Result<u64> {
        let mut completed = self.completed.lock().map_err(poisoned)?;
        let deleted = completed.len() as u64;
        completed.clear();
        Ok(deleted)
    }
}

#[async_trait::async_trait]
impl LogisticsStorage for MemoryStorage {
    async fn insert(&self, entry: NewLogisticsEntry) -> Result<LogisticsEntry> {
        let entry = LogisticsEntry::from_new(entry);
        self.logistics.lock().map_err(poisoned)?.push(entry.clone());
        Ok(entry)
    }
    async fn get_all(&self) -> Result<Vec<LogisticsEntry>> {
        let mut result = self.logistics.lock().map_err(poisoned)?.clone();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[async_trait::async_trait]
impl ProblemStorage for MemoryStorage {
    async fn insert(&self, problem: NewProblem) -> Result<ProblemEntry> {
        let entry = ProblemEntry::from_new(problem);
        self.problems.lock().map_err(poisoned)?.push(entry.clone());
        Ok(entry)
    }
    async fn get_open(&self) -> Result<Vec<ProblemEntry>> {
        let mut result = self
            .problems
            .lock()
            .map_err(poisoned)?
            .iter()
            .filter(|p| !p.is_resolved())
            .cloned()
            .collect::<Vec<_>>();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
    async fn get_resolved(&self) -> Result<Vec<ProblemEntry>> {
        let mut result = self
            .problems
            .lock()
            .map_err(poisoned)?
            .iter()
            .filter(|p| p.is_resolved())
            .cloned()
            .collect::<Vec<_>>();
        result.sort_by(|a, b| b.resolved_at.cmp(&a.resolved_at));
        Ok(result)
    }
    async fn resolve(&self, id: uuid::Uuid, resolved_by: &str) -> Result<Option<ProblemEntry>> {
        let mut problems = self.problems.lock().map_err(poisoned)?;
        Ok(problems.iter_mut().find(|p| p.id == id).map(|p| {
            p.resolved = Some(true);
            p.resolved_at = Some(Utc::now());
            p.resolved_by = Some(resolved_by.to_string());
            p.clone()
        }))
    }
}
