//! Farmer dashboard views over the seed data.


use clap::Subcommand;
use farmstand_core::OrderStatus;
use farmstand_dashboard::dashboard::LOW_STOCK_THRESHOLD;
use farmstand_dashboard::insights::{self, OrderSummary};
use farmstand_dashboard::orders::Order;
use farmstand_dashboard::{DashboardTab, FarmerDashboard};
use serde::Serialize;

use crate::output::Output;

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// List inventory, flagging low stock
    Inventory,
    /// List orders
    Orders {
        /// Only orders in this status
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// List customer messages
    Messages {
        /// Filter by customer name or message text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Sales insights
    Insights,
}

impl DashboardCommand {
    const fn tab(&self) -> DashboardTab {
        match self {
            Self::Inventory => DashboardTab::Inventory,
            Self::Orders { .. } => DashboardTab::Orders,
            Self::Messages { .. } => DashboardTab::Messages,
            Self::Insights => DashboardTab::Insights,
        }
    }
}

#[derive(Serialize)]
struct InsightsReport {
    stats: Vec<insights::StatCard>,
    top_products: Vec<insights::TopProduct>,
    orders: OrderSummary,
}

/// Render one dashboard tab.
pub fn run(command: &DashboardCommand, out: &Output) -> Result<(), Box<dyn std::error::Error>> {
    let mut dashboard = FarmerDashboard::seeded()?;
    dashboard.select_tab(command.tab());

    let badges = dashboard.badges();
    out.note(&format!(
        "{} | {} pending order(s), {} unread message(s), {} low-stock item(s)",
        dashboard.tab(),
        badges.pending_orders,
        badges.unread_messages,
        badges.low_stock_items
    ))?;

    match command {
        DashboardCommand::Inventory => {
            let items = dashboard.inventory().items();
            out.emit(items, |w| {
                for item in items {
                    let flag = if item.stock < LOW_STOCK_THRESHOLD {
                        "  LOW"
                    } else {
                        ""
                    };
                    writeln!(
                        w,
                        "{:>3}  {:<24} {:<12} {:>8} {:>5}{flag}",
                        item.id,
                        item.name,
                        item.category,
                        item.price.display(),
                        item.stock
                    )?;
                }
                Ok(())
            })?;
        }
        DashboardCommand::Orders { status } => {
            let orders: Vec<&Order> = match status {
                Some(status) => dashboard.orders().with_status(*status).collect(),
                None => dashboard.orders().orders().iter().collect(),
            };
            out.emit(&orders, |w| {
                for order in &orders {
                    writeln!(
                        w,
                        "{}  {}  {:<16} {:>8}  {}",
                        order.id,
                        order.date,
                        order.customer,
                        order.display_total(),
                        order.status.label()
                    )?;
                }
                Ok(())
            })?;
        }
        DashboardCommand::Messages { search } => {
            let messages = dashboard.inbox().search(search);
            out.emit(&messages, |w| {
                for message in &messages {
                    let marker = if message.unread { "*" } else { " " };
                    writeln!(
                        w,
                        "{marker} {:>3}  {:<16} {:<18} {}",
                        message.id, message.customer, message.timestamp, message.message
                    )?;
                }
                Ok(())
            })?;
        }
        DashboardCommand::Insights => {
            let report = InsightsReport {
                stats: insights::stat_cards().to_vec(),
                top_products: insights::top_products().to_vec(),
                orders: dashboard.order_summary(),
            };
            let widths = insights::bar_widths(&report.top_products);
            out.emit(&report, |w| {
                for card in &report.stats {
                    writeln!(w, "{:<14} {:>8}  {}", card.title, card.value, card.trend_label())?;
                }
                writeln!(w)?;
                for (product, width) in report.top_products.iter().zip(&widths) {
                    writeln!(
                        w,
                        "{:<18} {:>4} sold  {:>5}%",
                        product.name, product.units_sold, width
                    )?;
                }
                writeln!(w)?;
                let summary = &report.orders;
                writeln!(
                    w,
                    "Local orders: {} ({} new, {} in progress, {} completed)",
                    summary.order_count, summary.new_orders, summary.in_progress, summary.completed
                )?;
                writeln!(
                    w,
                    "Revenue {}, average order {}",
                    summary.revenue.display(),
                    summary.average_order.display()
                )
            })?;
        }
    }
    Ok(())
}
