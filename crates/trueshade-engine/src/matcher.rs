//! Shade ranking by CIE76 distance.
//!
//! Matching is purely geometric: undertone plays no part in the ranking.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use trueshade_core::{Error, LabColor, Result, ShadeRecord};

use crate::catalog::CatalogSnapshot;

/// A catalog shade with its distance to the skin tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadeMatch {
    /// Matched record
    pub shade: ShadeRecord,
    /// CIE76 distance to the representative color
    pub delta_e: f32,
}

/// Ranked matches per brand, brands in name order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MatchResult {
    brands: BTreeMap<String, Vec<ShadeMatch>>,
}

impl MatchResult {
    /// Matches of one brand, best first.
    pub fn brand(&self, name: &str) -> Option<&[ShadeMatch]> {
        self.brands.get(name).map(Vec::as_slice)
    }

    /// Brands with their matches.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShadeMatch])> {
        self.brands.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Closest shade across all brands. Ties keep brand order.
    pub fn best(&self) -> Option<&ShadeMatch> {
        self.brands
            .values()
            .filter_map(|m| m.first())
            .fold(None, |best: Option<&ShadeMatch>, m| match best {
                Some(b) if b.delta_e <= m.delta_e => Some(b),
                _ => Some(m),
            })
    }

    /// Shade names per brand, the shape used in responses.
    pub fn shade_names(&self) -> BTreeMap<String, Vec<String>> {
        self.brands
            .iter()
            .map(|(brand, matches)| {
                let names = matches.iter().map(|m| m.shade.shade_name.clone()).collect();
                (brand.clone(), names)
            })
            .collect()
    }

    /// Number of brands.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// `true` if no brand is present.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Ranks records by distance and keeps the `top_n` closest.
///
/// The sort is stable, so equal distances keep catalog order.
fn rank(lab: LabColor, records: &[ShadeRecord], top_n: usize) -> Vec<ShadeMatch> {
    let mut matches: Vec<ShadeMatch> = records
        .iter()
        .map(|r| ShadeMatch {
            shade: r.clone(),
            delta_e: lab.delta_e(r.lab),
        })
        .collect();
    matches.sort_by(|a, b| a.delta_e.total_cmp(&b.delta_e));
    matches.truncate(top_n);
    matches
}

/// Ranks every brand of the snapshot against `lab`.
///
/// Fails with [`Error::EmptyCatalog`] when the snapshot has no records.
pub fn match_shades(lab: LabColor, snapshot: &CatalogSnapshot, top_n: usize) -> Result<MatchResult> {
    if snapshot.is_empty() {
        return Err(Error::empty_catalog());
    }
    let brands: BTreeMap<String, Vec<ShadeMatch>> = snapshot
        .brands()
        .filter(|(_, records)| !records.is_empty())
        .map(|(brand, records)| (brand.to_string(), rank(lab, records, top_n)))
        .collect();
    debug!(
        %lab,
        brands = brands.len(),
        version = snapshot.version(),
        "matched shades"
    );
    Ok(MatchResult { brands })
}

/// Ranks one brand against `lab`.
///
/// Fails with [`Error::EmptyCatalog`] naming the brand when it has no
/// records; callers may treat that as "no matches".
pub fn match_brand(
    lab: LabColor,
    snapshot: &CatalogSnapshot,
    brand: &str,
    top_n: usize,
) -> Result<Vec<ShadeMatch>> {
    match snapshot.brand(brand) {
        Some(records) if !records.is_empty() => Ok(rank(lab, records, top_n)),
        _ => Err(Error::empty_brand(brand)),
    }
}
