//! Catalog inspection command

use crate::CatalogArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use trueshade_core::ShadeRecord;
use trueshade_engine::EngineConfig;

#[derive(Serialize)]
struct Summary<'a> {
    source: &'a str,
    version: u64,
    shades: usize,
    brands: BTreeMap<&'a str, usize>,
}

pub fn run(args: CatalogArgs, config: EngineConfig, verbose: u8) -> Result<()> {
    trace!(brand = ?args.brand, "catalog::run");

    let engine = super::build_engine(config, args.catalog, None)?;
    let snapshot = engine.catalog().current();

    if let Some(brand) = &args.brand {
        let Some(records) = snapshot.brand(brand) else {
            let known: Vec<&str> = snapshot.brand_names().collect();
            bail!("Unknown brand '{}' (available: {})", brand, known.join(", "));
        };
        if args.json {
            return super::write_json(&records, None);
        }
        print_shades(records, verbose);
        return Ok(());
    }

    let summary = Summary {
        source: snapshot.source(),
        version: snapshot.version(),
        shades: snapshot.len(),
        brands: snapshot.brands().map(|(b, r)| (b, r.len())).collect(),
    };
    if args.json {
        return super::write_json(&summary, None);
    }

    println!("Source:   {}", summary.source);
    println!("Version:  {}", summary.version);
    println!("Shades:   {}", summary.shades);
    for (brand, count) in &summary.brands {
        println!("  {brand:<12} {count:>4}");
    }
    Ok(())
}

fn print_shades(records: &[ShadeRecord], verbose: u8) {
    for r in records {
        if verbose > 0 {
            println!(
                "{:<20} {}  {:<8} {}  ({})",
                r.shade_name, r.hex, r.undertone, r.lab, r.product_line
            );
        } else {
            println!("{:<20} {}  {}", r.shade_name, r.hex, r.undertone);
        }
    }
}
