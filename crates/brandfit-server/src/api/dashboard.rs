use std::fmt::Write as _;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Extension,
};
use brandfit_ranking::render::escape_html;
use brandfit_ranking::{render_html_table, Weight};

use crate::middleware::RequestId;

use super::rankings::{load_table, page_title, resolve_params, RankingParams, RankingQuery};
use super::AppState;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
form{margin-bottom:1.5rem;display:flex;gap:1rem;align-items:center;}\
table.ranking{border-collapse:collapse;}\
table.ranking th,table.ranking td{border:1px solid #ccc;padding:4px 8px;text-align:left;}\
.error{color:#b00020;}";

/// The dashboard page: brand selector, weight input, reasons toggle, and the
/// ranked table for the current selection.
pub(super) async fn index(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RankingQuery>,
) -> (StatusCode, Html<String>) {
    let params = match resolve_params(&state, &query) {
        Ok(params) => params,
        Err(msg) => {
            let page = render_page(&state, None, &fallback_form(&query), &error_block(&msg));
            return (StatusCode::BAD_REQUEST, Html(page));
        }
    };

    let form = FormValues::from(&params);
    match load_table(&state, &params, &req_id.0).await {
        Ok(table) => {
            let page = render_page(&state, Some(&params), &form, &render_html_table(&table));
            (StatusCode::OK, Html(page))
        }
        Err(err) => {
            let page = render_page(
                &state,
                Some(&params),
                &form,
                &error_block(&err.error.message),
            );
            (err.status(), Html(page))
        }
    }
}

/// Values echoed back into the form controls.
struct FormValues {
    brand: Option<String>,
    weight: String,
    show_reasons: bool,
}

impl From<&RankingParams> for FormValues {
    fn from(params: &RankingParams) -> Self {
        Self {
            brand: Some(params.brand.name.clone()),
            weight: params.weight.to_string(),
            show_reasons: params.show_reasons,
        }
    }
}

fn fallback_form(query: &RankingQuery) -> FormValues {
    FormValues {
        brand: query.brand.clone(),
        weight: Weight::DEFAULT.to_string(),
        show_reasons: false,
    }
}

fn error_block(message: &str) -> String {
    format!("<p class=\"error\">{}</p>\n", escape_html(message))
}

fn render_page(
    state: &AppState,
    params: Option<&RankingParams>,
    form: &FormValues,
    body: &str,
) -> String {
    let title = params.map_or_else(
        || "Influencer Analysis".to_string(),
        |p| page_title(&p.brand),
    );
    let title = escape_html(&title);

    let mut options = String::new();
    for brand in &state.brands.brands {
        let selected = form
            .brand
            .as_deref()
            .is_some_and(|b| brand.matches(b));
        let _ = writeln!(
            options,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&brand.name),
            if selected { " selected" } else { "" },
            escape_html(&brand.title()),
        );
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
<style>{STYLE}</style>\n</head>\n<body>\n\
<form method=\"get\" action=\"/\">\n\
<label>Brand <select name=\"brand\">\n{options}</select></label>\n\
<label>Weight <input type=\"number\" name=\"weight\" min=\"0\" max=\"1\" step=\"0.1\" value=\"{weight}\"></label>\n\
<label><input type=\"checkbox\" name=\"show_reasons\" value=\"true\"{checked}> Show reasons</label>\n\
<button type=\"submit\">Update</button>\n</form>\n\
<h1>{title}</h1>\n{body}</body>\n</html>\n",
        weight = escape_html(&form.weight),
        checked = if form.show_reasons { " checked" } else { "" },
    )
}
