//! Dashboard statistics derived from the product and movement collections.
//!
//! Low stock is judged against each product's own `minStock` (which defaults
//! to [`DEFAULT_MIN_STOCK`](crate::product::DEFAULT_MIN_STOCK)). "Today" is
//! the UTC calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  movement::{Movement, MovementKind},
  product::Product,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total_products:  usize,
  pub total_stock:     i64,
  pub low_stock_count: usize,
  pub today_inbound:   usize,
  pub today_outbound:  usize,
}

/// Aggregate `products` and `movements` as of the UTC day `today`.
pub fn compute(products: &[Product], movements: &[Movement], today: NaiveDate) -> Stats {
  let mut stats = Stats {
    total_products: products.len(),
    ..Stats::default()
  };

  for product in products {
    stats.total_stock = stats.total_stock.saturating_add(product.quantity);
    if product.is_low_stock() {
      stats.low_stock_count += 1;
    }
  }

  for movement in movements.iter().filter(|m| m.created_at.date_naive() == today) {
    match movement.kind {
      MovementKind::Inbound => stats.today_inbound += 1,
      MovementKind::Outbound => stats.today_outbound += 1,
    }
  }

  stats
}
