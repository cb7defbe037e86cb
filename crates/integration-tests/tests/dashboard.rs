//! Farmer dashboard over the embedded seed data.

#![allow(clippy::unwrap_used)]

use farmstand_core::{InventoryItemId, MessageId, OrderStatus};
use farmstand_dashboard::inventory::{ImageUpload, InventoryDraft, InventoryError};
use farmstand_dashboard::messages::ReplyTemplate;
use farmstand_dashboard::{DashboardTab, FarmerDashboard};
use rust_decimal::Decimal;

fn dashboard() -> FarmerDashboard {
    FarmerDashboard::seeded().unwrap()
}

// =============================================================================
// Badges
// =============================================================================

#[test]
fn test_seed_badges() {
    let badges = dashboard().badges();
    assert_eq!(badges.pending_orders, 1);
    assert_eq!(badges.unread_messages, 2);
    assert_eq!(badges.low_stock_items, 1);
}

#[test]
fn test_badges_follow_work() {
    let mut dashboard = dashboard();
    dashboard
        .orders_mut()
        .update_status("#ORD-001", OrderStatus::Processing, None)
        .unwrap();
    dashboard
        .inbox_mut()
        .reply(MessageId::new(1), ReplyTemplate::OrderConfirmation.text())
        .unwrap();

    let badges = dashboard.badges();
    assert_eq!(badges.pending_orders, 0);
    assert_eq!(badges.unread_messages, 1);
    assert_eq!(dashboard.inbox().outbox().len(), 1);
}

#[test]
fn test_tab_selection() {
    let mut dashboard = dashboard();
    assert_eq!(dashboard.tab(), DashboardTab::Inventory);
    dashboard.select_tab("insights".parse().unwrap());
    assert_eq!(dashboard.tab(), DashboardTab::Insights);
}

// =============================================================================
// Inventory
// =============================================================================

#[test]
fn test_add_edit_delete_inventory() {
    let mut dashboard = dashboard();
    let mut draft = InventoryDraft {
        name: "Fresh Basil".to_string(),
        category: "Herbs".to_string(),
        price: Decimal::new(299, 2),
        stock: 30,
        ..InventoryDraft::default()
    };
    draft
        .attach_image(&ImageUpload::new("image/png", vec![0x89, b'P', b'N', b'G']))
        .unwrap();

    let added = dashboard.inventory_mut().add(draft).unwrap();
    assert_eq!(added.id, InventoryItemId::new(6));
    assert_eq!(dashboard.badges().low_stock_items, 2);

    let mut edited = added.clone();
    edited.stock = 90;
    assert!(dashboard.inventory_mut().update(edited).unwrap());
    assert_eq!(dashboard.badges().low_stock_items, 1);

    assert!(dashboard.inventory_mut().delete(added.id).is_some());
    assert_eq!(dashboard.inventory().items().len(), 5);
}

#[test]
fn test_invalid_draft_changes_nothing() {
    let mut dashboard = dashboard();
    let draft = InventoryDraft {
        name: "Kale".to_string(),
        ..InventoryDraft::default()
    };
    assert_eq!(
        dashboard.inventory_mut().add(draft),
        Err(InventoryError::MissingCategory)
    );
    assert_eq!(dashboard.inventory().items().len(), 5);
}

// =============================================================================
// Orders and Insights
// =============================================================================

#[test]
fn test_order_totals_match_items() {
    let dashboard = dashboard();
    for order in dashboard.orders().orders() {
        assert_eq!(order.items_total(), order.total, "{}", order.id);
    }
}

#[test]
fn test_order_summary_tracks_status_changes() {
    let mut dashboard = dashboard();
    assert_eq!(dashboard.order_summary().revenue.display(), "$60.92");

    dashboard
        .orders_mut()
        .update_status("#ORD-003", OrderStatus::Cancelled, Some("Refunded".into()))
        .unwrap();

    let summary = dashboard.order_summary();
    assert_eq!(summary.order_count, 2);
    assert_eq!(summary.revenue.display(), "$42.95");
    assert_eq!(summary.completed, 0);
}

#[test]
fn test_orders_serialize_for_export() {
    let dashboard = dashboard();
    let json = serde_json::to_value(dashboard.orders().orders()).unwrap();
    let first = json.get(0).unwrap();
    assert_eq!(first.get("id").unwrap(), "#ORD-001");
    assert_eq!(first.get("status").unwrap(), "pending");
}
