//! Sales insights.
//!
//! The stat cards and top-product chart are demo figures. The order
//! aggregates are computed from the local order book.

use farmstand_core::{OrderStatus, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::orders::OrderBook;

/// One headline stat with its month-over-month trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    /// Percent change against last month. Negative is a decline.
    pub trend_percent: i32,
}

impl StatCard {
    #[must_use]
    pub const fn is_up(&self) -> bool {
        self.trend_percent >= 0
    }

    /// Trend as shown under the value, e.g. `+15%` or `-3%`.
    #[must_use]
    pub fn trend_label(&self) -> String {
        format!("{:+}%", self.trend_percent)
    }
}

/// A best seller with its share of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub name: &'static str,
    pub units_sold: u32,
    pub revenue: Decimal,
}

/// Headline stats for the insights tab.
#[must_use]
pub fn stat_cards() -> [StatCard; 4] {
    [
        StatCard {
            title: "Total Sales",
            value: "$12,345",
            trend_percent: 15,
        },
        StatCard {
            title: "Orders",
            value: "256",
            trend_percent: 8,
        },
        StatCard {
            title: "Average Order",
            value: "$48.25",
            trend_percent: -3,
        },
        StatCard {
            title: "Customers",
            value: "1,234",
            trend_percent: 12,
        },
    ]
}

/// Best sellers, most units first.
#[must_use]
pub fn top_products() -> [TopProduct; 3] {
    [
        TopProduct {
            name: "Organic Tomatoes",
            units_sold: 234,
            revenue: Decimal::from(1168),
        },
        TopProduct {
            name: "Fresh Eggs",
            units_sold: 187,
            revenue: Decimal::from(1308),
        },
        TopProduct {
            name: "Raw Honey",
            units_sold: 156,
            revenue: Decimal::from(2027),
        },
    ]
}

/// Bar width for each product as a percentage of the best seller.
#[must_use]
pub fn bar_widths(products: &[TopProduct]) -> Vec<Decimal> {
    let max = products.iter().map(|p| p.units_sold).max().unwrap_or(0);
    products
        .iter()
        .map(|product| {
            if max == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(product.units_sold) * Decimal::ONE_HUNDRED / Decimal::from(max))
                    .round_dp(1)
            }
        })
        .collect()
}

/// Aggregates computed from the local orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Orders that were not cancelled.
    pub order_count: usize,
    /// Sum of the totals of orders that were not cancelled.
    pub revenue: Price,
    pub average_order: Price,
    pub new_orders: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl OrderSummary {
    #[must_use]
    pub fn from_orders(book: &OrderBook) -> Self {
        let live: Vec<_> = book
            .orders()
            .iter()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .collect();
        let revenue: Decimal = live.iter().map(|order| order.total).sum();
        let average = if live.is_empty() {
            Decimal::ZERO
        } else {
            revenue / Decimal::from(live.len())
        };
        let counts = book.counts();

        Self {
            order_count: live.len(),
            revenue: Price::usd(revenue),
            average_order: Price::usd(average),
            new_orders: counts.pending,
            in_progress: counts.processing + counts.shipped,
            completed: counts.delivered,
        }
    }
}
