//! The farmer dashboard shell.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::insights::OrderSummary;
use crate::inventory::Inventory;
use crate::messages::Inbox;
use crate::orders::OrderBook;
use crate::seed::DashboardSeed;

/// Stock level below which an item raises a low-stock alert.
pub const LOW_STOCK_THRESHOLD: u32 = 60;

/// Sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Inventory,
    Orders,
    Messages,
    Insights,
}

impl DashboardTab {
    pub const ALL: [Self; 4] = [Self::Inventory, Self::Orders, Self::Messages, Self::Insights];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::Orders => "Orders",
            Self::Messages => "Messages",
            Self::Insights => "Insights",
        }
    }
}

impl std::fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dashboard tab: {s}"))
    }
}

/// Header counters shown on every tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardBadges {
    pub unread_messages: usize,
    pub pending_orders: usize,
    pub low_stock_items: usize,
}

/// The farmer's working state: one inventory, order book and inbox.
#[derive(Debug, Clone, Default)]
pub struct FarmerDashboard {
    tab: DashboardTab,
    inventory: Inventory,
    orders: OrderBook,
    inbox: Inbox,
}

impl FarmerDashboard {
    #[must_use]
    pub const fn new(inventory: Inventory, orders: OrderBook, inbox: Inbox) -> Self {
        Self {
            tab: DashboardTab::Inventory,
            inventory,
            orders,
            inbox,
        }
    }

    /// A dashboard over the embedded demo data.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Seed` if the embedded seed is malformed.
    pub fn seeded() -> Result<Self> {
        let seed = DashboardSeed::embedded()?;
        info!(
            inventory = seed.inventory.len(),
            orders = seed.orders.len(),
            messages = seed.messages.len(),
            "Dashboard seeded"
        );
        Ok(Self::new(seed.inventory(), seed.order_book(), seed.inbox()))
    }

    #[must_use]
    pub const fn tab(&self) -> DashboardTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        debug!(%tab, "Dashboard tab selected");
        self.tab = tab;
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub const fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub const fn orders_mut(&mut self) -> &mut OrderBook {
        &mut self.orders
    }

    #[must_use]
    pub const fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub const fn inbox_mut(&mut self) -> &mut Inbox {
        &mut self.inbox
    }

    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_orders(&self.orders)
    }

    #[must_use]
    pub fn badges(&self) -> DashboardBadges {
        DashboardBadges {
            unread_messages: self.inbox.unread_count(),
            pending_orders: self.orders.counts().pending,
            low_stock_items: self.inventory.low_stock(LOW_STOCK_THRESHOLD).count(),
        }
    }
}
