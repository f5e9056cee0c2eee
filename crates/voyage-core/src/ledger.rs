//! Resource Ledger
//!
//! Exact, non-negative bookkeeping of the shared inventory. A consume that
//! cannot be covered in full is rejected without touching the stock.

use std::collections::BTreeMap;

use voyage_events::{ResourceCategory, ResourceStock, ResourceType};

use crate::config::ResourceTable;
use crate::error::{positive_amount, CommandError};

#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    stock: BTreeMap<ResourceType, u32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger with each configured resource's initial stock.
    pub fn from_table(table: &ResourceTable) -> Self {
        Self {
            stock: table.iter().map(|s| (s.kind, s.initial_stock)).collect(),
        }
    }

    /// Current quantity; 0 for resources never seen.
    pub fn amount(&self, resource: ResourceType) -> u32 {
        self.stock.get(&resource).copied().unwrap_or(0)
    }

    pub fn can_cover(&self, resource: ResourceType, amount: u32) -> bool {
        self.amount(resource) >= amount
    }

    /// Adds stock. Non-positive amounts are ignored and return false.
    pub fn add(&mut self, resource: ResourceType, amount: i32) -> bool {
        let Ok(amount) = positive_amount(amount) else {
            return false;
        };
        let entry = self.stock.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
        tracing::debug!("ledger +{} {} (now {})", amount, resource, *entry);
        true
    }

    /// Removes exactly `amount` units, or nothing at all.
    pub fn consume(&mut self, resource: ResourceType, amount: i32) -> Result<u32, CommandError> {
        let requested = positive_amount(amount)?;
        let available = self.amount(resource);
        if available < requested {
            return Err(CommandError::InsufficientResource {
                resource,
                requested,
                available,
            });
        }
        let remaining = available - requested;
        self.stock.insert(resource, remaining);
        tracing::debug!("ledger -{} {} (now {})", requested, resource, remaining);
        Ok(remaining)
    }

    /// Total units held across every resource of `category`.
    pub fn total_in(&self, table: &ResourceTable, category: ResourceCategory) -> u32 {
        table
            .of_category(category)
            .into_iter()
            .map(|r| self.amount(r))
            .sum()
    }

    /// Stock listing in stable resource order.
    pub fn stocks(&self) -> Vec<ResourceStock> {
        self.stock
            .iter()
            .map(|(resource, amount)| ResourceStock {
                resource: *resource,
                amount: *amount,
            })
            .collect()
    }
}
