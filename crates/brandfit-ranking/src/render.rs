//! Renderers for a [`RankingTable`]. All of them are deterministic: the same
//! table (and the same image files) always produce the same output.

use std::fmt::Write as _;

use base64::Engine as _;

use crate::error::RankingError;
use crate::present::{DisplayRow, ImageRef, RankingTable, NOT_AVAILABLE, NO_IMAGE};

const IMAGE_WIDTH_PX: u32 = 50;

/// Plain-text table with space-padded columns, for terminals.
#[must_use]
pub fn render_text_table(table: &RankingTable) -> String {
    let headers = table.headers();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let photo = row
                .image
                .path()
                .map_or_else(|| NO_IMAGE.to_string(), |p| p.display().to_string());
            cells(
                row,
                table.show_reasons,
                photo,
                format!("{} ({})", row.influencer, row.contact_link),
            )
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_text_line(&mut out, headers.iter().copied(), &widths);
    push_text_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_text_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_text_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// CSV export of the projection.
///
/// The photo column holds the image path (or `No Image`), and an extra
/// `Instagram` column follows `Influencer` so the link survives export.
///
/// # Errors
///
/// Returns [`RankingError::Write`] if the CSV writer fails.
pub fn render_csv(table: &RankingTable) -> Result<String, RankingError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut headers = table.headers();
    headers.insert(2, "Instagram");
    writer.write_record(&headers)?;

    for row in &table.rows {
        let photo = row
            .image
            .path()
            .map_or_else(|| NO_IMAGE.to_string(), |p| p.display().to_string());
        let mut record = cells(row, table.show_reasons, photo, row.influencer.clone());
        record.insert(2, row.contact_link.clone());
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RankingError::Write(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// HTML `<table>` with inlined photos and linked names. All text is escaped.
#[must_use]
pub fn render_html_table(table: &RankingTable) -> String {
    let mut out = String::from("<table class=\"ranking\">\n<thead>\n<tr>");
    for header in table.headers() {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        let photo = image_html(&row.image);
        let name = name_html(&row.influencer, &row.contact_link);
        let cells = cells(row, table.show_reasons, photo, name);

        out.push_str("<tr>");
        for (i, cell) in cells.iter().enumerate() {
            // Photo and name cells are already markup.
            if i < 2 {
                let _ = write!(out, "<td>{cell}</td>");
            } else {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Links the name only for http(s) contact URLs; anything else renders as
/// plain text.
fn name_html(name: &str, link: &str) -> String {
    if is_web_link(link) {
        format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(link),
            escape_html(name)
        )
    } else {
        escape_html(name)
    }
}

fn is_web_link(link: &str) -> bool {
    let link = link.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        link.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn image_html(image: &ImageRef) -> String {
    let Some(path) = image.path() else {
        return NO_IMAGE.to_string();
    };
    match std::fs::read(path) {
        Ok(bytes) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            format!(
                "<img src=\"data:image/jpeg;base64,{encoded}\" style=\"width:{IMAGE_WIDTH_PX}px;\">"
            )
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "image unreadable");
            NO_IMAGE.to_string()
        }
    }
}

/// Cells in header order, with the first two supplied by the renderer.
fn cells(row: &DisplayRow, show_reasons: bool, photo: String, name: String) -> Vec<String> {
    let mut cells = vec![
        photo,
        name,
        row.category.clone(),
        row.followers.clone(),
        row.appearance_score.clone(),
        row.brand_fit_score.clone(),
        row.total_score.clone(),
    ];
    if show_reasons {
        for reason in [&row.appearance_reason, &row.brand_fit_reason] {
            cells.push(reason.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()));
        }
    }
    cells
}

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
