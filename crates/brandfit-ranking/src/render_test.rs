use std::path::PathBuf;

use super::*;

fn row(name: &str, image: ImageRef) -> DisplayRow {
    DisplayRow {
        influencer: name.to_string(),
        contact_link: format!("https://instagram.com/{name}"),
        image,
        category: "Music".to_string(),
        followers: "1,234".to_string(),
        appearance_score: "0.800".to_string(),
        brand_fit_score: "0.600".to_string(),
        total_score: "0.700".to_string(),
        appearance_reason: None,
        brand_fit_reason: None,
    }
}

fn table(rows: Vec<DisplayRow>, show_reasons: bool) -> RankingTable {
    RankingTable {
        brand: "lyft".to_string(),
        weight: 0.5,
        show_reasons,
        rows,
    }
}

#[test]
fn text_table_aligns_columns() {
    let out = render_text_table(&table(
        vec![row("ann", ImageRef::NoImage), row("bartholomew", ImageRef::NoImage)],
        false,
    ));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Photo"));
    assert!(lines[1].starts_with("--------"));
    assert!(lines[2].starts_with("No Image  ann (https://instagram.com/ann)"));

    let category_col = lines[0].find("Category").expect("header");
    assert_eq!(&lines[2][category_col..category_col + 5], "Music");
    assert_eq!(&lines[3][category_col..category_col + 5], "Music");
}

#[test]
fn csv_includes_link_column() {
    let out = render_csv(&table(vec![row("ann", ImageRef::NoImage)], false)).expect("csv");
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("Photo,Influencer,Instagram,Category,Followers,Appearance Score,Brand Fit Score,Total Score")
    );
    assert_eq!(
        lines.next(),
        Some("No Image,ann,https://instagram.com/ann,Music,\"1,234\",0.800,0.600,0.700")
    );
}

#[test]
fn csv_projects_reasons_when_requested() {
    let mut with_reasons = row("ann", ImageRef::NoImage);
    with_reasons.appearance_reason = Some("Bright".to_string());
    with_reasons.brand_fit_reason = Some("N/A".to_string());

    let out = render_csv(&table(vec![with_reasons], true)).expect("csv");
    let header = out.lines().next().expect("header");
    assert!(header.ends_with("Appearance Reason,Brand Fit Reason"));
    assert!(out.lines().nth(1).expect("row").ends_with("Bright,N/A"));
}

#[test]
fn html_escapes_text_and_links_names() {
    let mut hostile = row("<script>", ImageRef::NoImage);
    hostile.category = "R&B".to_string();

    let out = render_html_table(&table(vec![hostile], false));
    assert!(out.contains("<a href=\"https://instagram.com/&lt;script&gt;\" target=\"_blank\">&lt;script&gt;</a>"));
    assert!(out.contains("<td>R&amp;B</td>"));
    assert!(out.contains("<td>No Image</td>"));
    assert!(!out.contains("<script>"));
}

#[test]
fn html_links_only_web_contact_urls() {
    let mut script = row("ann", ImageRef::NoImage);
    script.contact_link = "javascript:alert(1)".to_string();
    let mut upper = row("bo", ImageRef::NoImage);
    upper.contact_link = "HTTPS://ig/bo".to_string();

    let out = render_html_table(&table(vec![script, upper], false));
    assert!(!out.contains("javascript:"));
    assert!(out.contains("<td>ann</td>"));
    assert!(out.contains("<a href=\"HTTPS://ig/bo\" target=\"_blank\">bo</a>"));
}

#[test]
fn html_inlines_images_as_data_uri() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ann.jpg");
    std::fs::write(&path, b"abc").expect("write");

    let out = render_html_table(&table(vec![row("ann", ImageRef::Available(path))], false));
    assert!(out.contains("<img src=\"data:image/jpeg;base64,YWJj\" style=\"width:50px;\">"));
}

#[test]
fn html_unreadable_image_falls_back_to_placeholder() {
    let gone = PathBuf::from("/nonexistent/brandfit/ann.jpg");
    let out = render_html_table(&table(vec![row("ann", ImageRef::Available(gone))], false));
    assert!(out.contains("<td>No Image</td>"));
}

#[test]
fn renderers_are_deterministic() {
    let t = table(vec![row("ann", ImageRef::NoImage), row("bo", ImageRef::NoImage)], true);
    assert_eq!(render_text_table(&t), render_text_table(&t));
    assert_eq!(render_html_table(&t), render_html_table(&t));
    assert_eq!(render_csv(&t).expect("csv"), render_csv(&t).expect("csv"));
}
