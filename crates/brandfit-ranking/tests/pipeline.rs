//! End-to-end ranking runs over on-disk CSV fixtures.

use std::path::Path;

use brandfit_ranking::{
    render_csv, render_html_table, render_text_table, run_pipeline, RankingError, RankingRequest,
    RankingTable, Weight,
};

const APPEARANCE: &str = "\
influencer,score,reason
alice,0.90,Polished studio look
bob,0.40,Casual
carol,0.70,Outdoor energy
dave,0.80,No metadata for me
erin,0.60,Missing brand fit
frank,,Unscored appearance
";

const METADATA: &str = "\
influencer,instagram,last_followers,category,country
alice,https://instagram.com/alice,1234567,Lifestyle,US
bob,https://instagram.com/bob,0,Comedy,UK
carol,https://instagram.com/carol,98765.4,Travel,CA
dave,,5000,Music,US
erin,https://instagram.com/erin,lots,Fitness,US
frank,https://instagram.com/frank,2500,Food,US
";

const BRAND_FIT: &str = "\
brand,influencer,score,reason
Lyft,alice,0.50,Urban commuter audience
lyft,bob,0.95,Rideshare humor
LYFT,carol,0.20,Rarely in cities
kroger,erin,0.99,Groceries
lyft,frank,0.70,Food runs
lyft,alice,0.10,Later duplicate ignored
";

fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "top_100_lyft_reasons.csv", APPEARANCE);
    write(dir.path(), "top_100.csv", METADATA);
    write(dir.path(), "ad_suitability_results.csv", BRAND_FIT);
    dir
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

fn run(dir: &Path, brand: &str, weight: f64) -> RankingTable {
    let request = RankingRequest::new(
        brand,
        Weight::new(weight).expect("weight"),
        dir,
        &dir.join("images"),
    )
    .with_reasons(true);
    run_pipeline(&request).expect("pipeline")
}

fn names(table: &RankingTable) -> Vec<&str> {
    table.rows.iter().map(|r| r.influencer.as_str()).collect()
}

#[test]
fn ranks_by_weighted_total_with_absent_last() {
    let dir = fixture_dir();
    let table = run(dir.path(), "lyft", 0.5);

    // alice 0.700, bob 0.675, carol 0.450, then erin (no fit) and frank (no appearance).
    assert_eq!(names(&table), vec!["alice", "bob", "carol", "erin", "frank"]);
    let totals: Vec<&str> = table.rows.iter().map(|r| r.total_score.as_str()).collect();
    assert_eq!(totals, vec!["0.700", "0.675", "0.450", "N/A", "N/A"]);
}

#[test]
fn rows_without_contact_link_are_excluded() {
    let dir = fixture_dir();
    let table = run(dir.path(), "lyft", 0.5);
    assert!(!names(&table).contains(&"dave"));
    assert!(table
        .rows
        .iter()
        .all(|r| !r.contact_link.is_empty() && !r.followers.is_empty()));
}

#[test]
fn influencer_without_brand_fit_shows_not_available() {
    let dir = fixture_dir();
    let table = run(dir.path(), "lyft", 0.5);
    let erin = table
        .rows
        .iter()
        .find(|r| r.influencer == "erin")
        .expect("erin present");
    assert_eq!(erin.brand_fit_score, "N/A");
    assert_eq!(erin.total_score, "N/A");
    assert_eq!(erin.followers, "N/A");
    assert_eq!(erin.brand_fit_reason.as_deref(), Some("N/A"));
}

#[test]
fn follower_counts_are_formatted() {
    let dir = fixture_dir();
    let table = run(dir.path(), "lyft", 0.5);
    let followers = |name: &str| {
        table
            .rows
            .iter()
            .find(|r| r.influencer == name)
            .map(|r| r.followers.clone())
    };
    assert_eq!(followers("alice").as_deref(), Some("1,234,567"));
    assert_eq!(followers("bob").as_deref(), Some("0"));
    assert_eq!(followers("carol").as_deref(), Some("98,765"));
}

#[test]
fn duplicate_brand_fit_takes_first_row() {
    let dir = fixture_dir();
    let table = run(dir.path(), "lyft", 0.0);
    let alice = table
        .rows
        .iter()
        .find(|r| r.influencer == "alice")
        .expect("alice present");
    assert_eq!(alice.brand_fit_score, "0.500");
    assert_eq!(alice.brand_fit_reason.as_deref(), Some("Urban commuter audience"));
}

#[test]
fn extreme_weights_select_one_component() {
    let dir = fixture_dir();

    let fit_only = run(dir.path(), "lyft", 0.0);
    for row in fit_only.rows.iter().filter(|r| r.total_score != "N/A") {
        assert_eq!(row.total_score, row.brand_fit_score);
    }
    assert_eq!(names(&fit_only)[..3], ["bob", "alice", "carol"]);

    let appearance_only = run(dir.path(), "lyft", 1.0);
    for row in appearance_only.rows.iter().filter(|r| r.total_score != "N/A") {
        assert_eq!(row.total_score, row.appearance_score);
    }
    assert_eq!(names(&appearance_only)[..3], ["alice", "carol", "bob"]);
}

#[test]
fn brand_selector_is_case_insensitive() {
    let dir = fixture_dir();
    let lower = run(dir.path(), "lyft", 0.5);
    let mixed = run(dir.path(), "Lyft", 0.5);
    assert_eq!(lower, mixed);
}

#[test]
fn repeated_runs_render_identically() {
    let dir = fixture_dir();
    let first = run(dir.path(), "lyft", 0.3);
    let second = run(dir.path(), "lyft", 0.3);

    assert_eq!(render_text_table(&first), render_text_table(&second));
    assert_eq!(render_html_table(&first), render_html_table(&second));
    assert_eq!(
        render_csv(&first).expect("csv"),
        render_csv(&second).expect("csv")
    );
}

#[test]
fn missing_source_halts_without_partial_output() {
    let dir = fixture_dir();
    std::fs::remove_file(dir.path().join("top_100.csv")).expect("remove");

    let request = RankingRequest::new("lyft", Weight::DEFAULT, dir.path(), dir.path());
    let err = run_pipeline(&request).expect_err("missing metadata");
    assert!(matches!(err, RankingError::MissingSource { .. }));
    assert_eq!(err.to_string(), "File not found: top_100.csv");
}

#[test]
fn images_are_resolved_from_image_dir() {
    let dir = fixture_dir();
    let images = dir.path().join("images");
    std::fs::create_dir(&images).expect("mkdir");
    std::fs::write(images.join("alice.jpg"), b"jpeg").expect("write image");

    let table = run(dir.path(), "lyft", 0.5);
    let alice = &table.rows[0];
    assert_eq!(alice.image.path(), Some(images.join("alice.jpg").as_path()));
    assert_eq!(table.rows[1].image.path(), None);

    let html = render_html_table(&table);
    assert!(html.contains("data:image/jpeg;base64,anBlZw=="));
    assert!(html.contains("No Image"));
}

#[test]
fn truncated_brand_fit_row_degrades_instead_of_failing() {
    let dir = fixture_dir();
    write(
        dir.path(),
        "ad_suitability_results.csv",
        "brand,influencer,score,reason\nlyft,alice,0.60,Urban\nlyft\n",
    );

    let table = run(dir.path(), "lyft", 0.5);
    assert_eq!(table.rows[0].influencer, "alice");
    assert_eq!(table.rows[0].total_score, "0.750");
    let bob = table.rows.iter().find(|r| r.influencer == "bob").expect("bob row");
    assert_eq!(bob.brand_fit_score, "N/A");
}
