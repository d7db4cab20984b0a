//! Plain-text rendering of command results.

use std::fmt::Write as _;

use wms_core::{
  movement::{Movement, StockChange},
  product::Product,
  stats::Stats,
  supplier::Supplier,
};

pub fn products(products: &[Product]) -> String {
  let mut out = format!(
    "{:<36}  {:<24}  {:<12}  {:>8}  {:>5}\n",
    "ID", "NAME", "SKU", "QTY", "MIN"
  );
  for p in products {
    let flag = if p.is_low_stock() { "  low" } else { "" };
    let _ = writeln!(
      out,
      "{:<36}  {:<24}  {:<12}  {:>8}  {:>5}{flag}",
      p.id,
      p.name,
      p.sku.as_deref().unwrap_or("-"),
      p.quantity,
      p.min_stock,
    );
  }
  let _ = write!(out, "{} product(s)", products.len());
  out
}

pub fn product(p: &Product) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "id:          {}", p.id);
  let _ = writeln!(out, "name:        {}", p.name);
  let _ = writeln!(out, "sku:         {}", p.sku.as_deref().unwrap_or("-"));
  let _ = writeln!(out, "category:    {}", p.category.as_deref().unwrap_or("-"));
  let _ = writeln!(out, "quantity:    {}", p.quantity);
  let _ = writeln!(out, "min stock:   {}", p.min_stock);
  if let Some(price) = p.price {
    let _ = writeln!(out, "price:       {price:.2}");
  }
  let _ = write!(out, "updated:     {}", p.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
  out
}

pub fn movements(movements: &[Movement]) -> String {
  let mut out = format!(
    "{:<19}  {:<8}  {:<24}  {:>8}  {}\n",
    "TIME (UTC)", "TYPE", "PRODUCT", "QTY", "REASON"
  );
  for m in movements {
    let _ = writeln!(
      out,
      "{:<19}  {:<8}  {:<24}  {:>8}  {}",
      m.created_at.format("%Y-%m-%d %H:%M:%S"),
      m.kind,
      m.product_name.as_deref().unwrap_or("?"),
      m.delta(),
      m.reason.as_deref().unwrap_or(""),
    );
  }
  let _ = write!(out, "{} movement(s)", movements.len());
  out
}

pub fn stock_change(change: &StockChange) -> String {
  format!(
    "{} {} × {}: now {} on hand",
    change.movement.kind,
    change.movement.quantity,
    change.product.name,
    change.product.quantity,
  )
}

pub fn suppliers(suppliers: &[Supplier]) -> String {
  let mut out = format!("{:<36}  {:<24}  {:<8}  {}\n", "ID", "NAME", "TYPE", "CONTACT");
  for s in suppliers {
    let contact = s.email.as_deref().or(s.phone.as_deref()).unwrap_or("-");
    let _ = writeln!(out, "{:<36}  {:<24}  {:<8}  {contact}", s.id, s.name, s.kind);
  }
  let _ = write!(out, "{} partner(s)", suppliers.len());
  out
}

pub fn stats(stats: &Stats) -> String {
  format!(
    "products:        {}\n\
     total stock:     {}\n\
     low stock:       {}\n\
     inbound today:   {}\n\
     outbound today:  {}",
    stats.total_products,
    stats.total_stock,
    stats.low_stock_count,
    stats.today_inbound,
    stats.today_outbound,
  )
}
