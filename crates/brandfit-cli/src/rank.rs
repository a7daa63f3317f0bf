use std::path::Path;

use anyhow::Context;
use brandfit_core::{AppConfig, BrandsFile};
use brandfit_ranking::render::escape_html;
use brandfit_ranking::{
    render_csv, render_html_table, render_text_table, run_pipeline, RankingRequest, Weight,
};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Csv,
    Html,
}

#[derive(Debug, Clone)]
pub(crate) struct RankOptions {
    pub brand: String,
    pub weight: f64,
    pub show_reasons: bool,
    pub format: OutputFormat,
}

/// Run the ranking pipeline and render it in the requested format.
pub(crate) fn render_ranking(
    config: &AppConfig,
    brands: &BrandsFile,
    options: &RankOptions,
) -> anyhow::Result<String> {
    let brand = brands.find(&options.brand).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown brand '{}' (configured: {})",
            options.brand,
            brands.names().join(", ")
        )
    })?;
    let weight = Weight::new(options.weight)?;

    let request = RankingRequest::new(&brand.name, weight, &config.data_dir, &config.image_dir)
        .with_reasons(options.show_reasons);
    let table = run_pipeline(&request)
        .with_context(|| format!("ranking failed for brand '{}'", brand.name))?;

    let title = format!("{} Influencer Analysis", brand.title());
    let rendered = match options.format {
        OutputFormat::Table => format!("{title}\n\n{}", render_text_table(&table)),
        OutputFormat::Csv => render_csv(&table)?,
        OutputFormat::Html => format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{t}</title>\n</head>\n<body>\n<h1>{t}</h1>\n{table}</body>\n</html>\n",
            t = escape_html(&title),
            table = render_html_table(&table),
        ),
    };
    Ok(rendered)
}

/// Render the ranking to `output`, or stdout when no path is given.
pub(crate) fn run_rank(
    config: &AppConfig,
    brands: &BrandsFile,
    options: &RankOptions,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = render_ranking(config, brands, options)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote ranking -> {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
