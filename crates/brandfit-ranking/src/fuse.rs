//! Joining the three sources into one record per influencer.

use std::collections::HashMap;

use crate::types::{AppearanceRow, BrandFitRow, InfluencerRecord, MetadataRow};

/// Left-join metadata onto appearance rows and drop rows without a contact
/// link or follower count.
///
/// Appearance order is preserved. Duplicate metadata rows for one influencer
/// fan out into one anchor record each, in metadata file order. Zero
/// followers is valid; only a blank value counts as missing.
#[must_use]
pub fn anchor_set(appearance: &[AppearanceRow], metadata: &[MetadataRow]) -> Vec<InfluencerRecord> {
    let mut meta_by_id: HashMap<&str, Vec<&MetadataRow>> = HashMap::new();
    for row in metadata {
        meta_by_id
            .entry(row.influencer_id.as_str())
            .or_default()
            .push(row);
    }

    let mut anchors = Vec::with_capacity(appearance.len());
    let mut dropped = 0usize;

    for app in appearance {
        let Some(matches) = meta_by_id.get(app.influencer_id.as_str()) else {
            dropped += 1;
            continue;
        };

        for meta in matches {
            let (Some(link), Some(followers)) = (
                non_blank(meta.contact_link.as_deref()),
                non_blank(meta.follower_count.as_deref()),
            ) else {
                dropped += 1;
                continue;
            };

            anchors.push(InfluencerRecord {
                influencer_id: app.influencer_id.clone(),
                contact_link: link.to_string(),
                follower_count: followers.to_string(),
                category: meta.category.clone(),
                appearance_score: app.score,
                appearance_reason: app.reason.clone(),
                brand_fit_score: None,
                brand_fit_reason: None,
            });
        }
    }

    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = anchors.len(),
            "dropped rows lacking a contact link or follower count"
        );
    }

    anchors
}

/// Keep only rows for `brand` (case-insensitive) and index them by influencer.
///
/// When an influencer appears more than once for the same brand, the first
/// row in file order wins.
#[must_use]
pub fn brand_fit_for<'a>(rows: &'a [BrandFitRow], brand: &str) -> HashMap<&'a str, &'a BrandFitRow> {
    let wanted = brand.trim().to_lowercase();
    let mut by_id: HashMap<&str, &BrandFitRow> = HashMap::new();

    for row in rows.iter().filter(|r| r.brand.trim().to_lowercase() == wanted) {
        if by_id.contains_key(row.influencer_id.as_str()) {
            tracing::debug!(
                influencer = %row.influencer_id,
                brand = %wanted,
                "duplicate brand-fit row ignored"
            );
            continue;
        }
        by_id.insert(row.influencer_id.as_str(), row);
    }

    by_id
}

/// Attach brand-fit score and reason to each anchor record.
///
/// Anchors without a matching brand-fit row keep absent brand-fit fields.
#[must_use]
pub fn attach_brand_fit(
    anchors: Vec<InfluencerRecord>,
    brand_fit: &HashMap<&str, &BrandFitRow>,
) -> Vec<InfluencerRecord> {
    anchors
        .into_iter()
        .map(|anchor| match brand_fit.get(anchor.influencer_id.as_str()) {
            Some(fit) => InfluencerRecord {
                brand_fit_score: fit.score,
                brand_fit_reason: fit.reason.clone(),
                ..anchor
            },
            None => anchor,
        })
        .collect()
}

/// Run both joins for `brand`.
#[must_use]
pub fn fuse(
    appearance: &[AppearanceRow],
    metadata: &[MetadataRow],
    brand_fit: &[BrandFitRow],
    brand: &str,
) -> Vec<InfluencerRecord> {
    let anchors = anchor_set(appearance, metadata);
    let fits = brand_fit_for(brand_fit, brand);
    attach_brand_fit(anchors, &fits)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
