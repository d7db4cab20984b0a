//! `wms` — command-line client for the warehouse inventory service.
//!
//! # Usage
//!
//! ```text
//! wms --url http://localhost:8080 products list
//! wms outbound <product-id> 3 --reason "order 1042"
//! wms --mode demo --data-dir ./wms-data stats
//! ```

mod backend;
mod client;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use backend::{Backend, Mode};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wms_core::{
  movement::{MovementFilter, MovementKind, MovementRequest},
  product::NewProduct,
  supplier::{NewSupplier, PartnerKind},
};

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_DATA_DIR: &str = "wms-data";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "wms", about = "Command-line client for the warehouse inventory service")]
struct Args {
  /// Path to a TOML config file (url, mode, data_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the wms server (default: http://localhost:8080).
  #[arg(long, env = "WMS_URL")]
  url: Option<String>,

  /// Talk to the server, or work on local data.
  #[arg(long, env = "WMS_MODE", value_enum)]
  mode: Option<Mode>,

  /// Local data directory used in demo mode (default: ./wms-data).
  #[arg(long, env = "WMS_DATA_DIR", value_name = "DIR")]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Products and their stock levels.
  #[command(subcommand)]
  Products(ProductCommand),
  /// List the movement log.
  Movements {
    /// Only `inbound` or `outbound` movements.
    #[arg(long = "type", value_name = "TYPE")]
    kind:    Option<MovementKind>,
    /// Only movements of this product.
    #[arg(long)]
    product: Option<Uuid>,
  },
  /// Receive stock into a product.
  Inbound(MovementArgs),
  /// Dispatch stock from a product.
  Outbound(MovementArgs),
  /// Suppliers and customers.
  #[command(subcommand)]
  Suppliers(SupplierCommand),
  /// Dashboard counters for today (UTC).
  Stats,
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
  List,
  Show {
    id: Uuid,
  },
  Add {
    name:        String,
    #[arg(long)]
    sku:         Option<String>,
    #[arg(long)]
    category:    Option<String>,
    /// Opening stock.
    #[arg(long, default_value_t = 0)]
    quantity:    i64,
    #[arg(long)]
    price:       Option<f64>,
    /// Low-stock threshold (default 10).
    #[arg(long)]
    min_stock:   Option<i64>,
    #[arg(long)]
    description: Option<String>,
  },
}

#[derive(clap::Args, Debug)]
struct MovementArgs {
  product_id: Uuid,
  quantity:   i64,
  #[arg(long)]
  reason:     Option<String>,
}

impl From<MovementArgs> for MovementRequest {
  fn from(a: MovementArgs) -> Self {
    Self { product_id: a.product_id, quantity: a.quantity, reason: a.reason }
  }
}

#[derive(Subcommand, Debug)]
enum SupplierCommand {
  List,
  Add {
    name:    String,
    #[arg(long)]
    phone:   Option<String>,
    #[arg(long)]
    email:   Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// `supplier` or `customer`.
    #[arg(long = "type", default_value = "supplier")]
    kind:    PartnerKind,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug, PartialEq)]
struct ConfigFile {
  url:      Option<String>,
  mode:     Option<Mode>,
  data_dir: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // Flags and environment override the config file, which overrides defaults.
  let backend = match args.mode.or(file_cfg.mode).unwrap_or_default() {
    Mode::Connected => {
      let url = args
        .url
        .or(file_cfg.url)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
      Backend::remote(&url)?
    }
    Mode::Demo => {
      let dir = args
        .data_dir
        .or(file_cfg.data_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
      Backend::demo(&dir).await?
    }
  };

  let text = run(&backend, args.command).await?;
  println!("{text}");
  Ok(())
}

async fn run(backend: &Backend, command: Command) -> Result<String> {
  Ok(match command {
    Command::Products(ProductCommand::List) => output::products(&backend.list_products().await?),
    Command::Products(ProductCommand::Show { id }) => output::product(&backend.product(id).await?),
    Command::Products(ProductCommand::Add {
      name,
      sku,
      category,
      quantity,
      price,
      min_stock,
      description,
    }) => {
      let input = NewProduct { name, sku, category, quantity, price, min_stock, description };
      output::product(&backend.create_product(input).await?)
    }
    Command::Movements { kind, product } => {
      let filter = MovementFilter { kind, product_id: product };
      output::movements(&backend.list_movements(filter).await?)
    }
    Command::Inbound(a) => {
      output::stock_change(&backend.record(MovementKind::Inbound, a.into()).await?)
    }
    Command::Outbound(a) => {
      output::stock_change(&backend.record(MovementKind::Outbound, a.into()).await?)
    }
    Command::Suppliers(SupplierCommand::List) => output::suppliers(&backend.list_suppliers().await?),
    Command::Suppliers(SupplierCommand::Add { name, phone, email, address, kind }) => {
      let input = NewSupplier { name, phone, email, address, kind };
      let supplier = backend.create_supplier(input).await?;
      format!("added {} {} ({})", supplier.kind, supplier.name, supplier.id)
    }
    Command::Stats => output::stats(&backend.stats().await?),
  })
}
