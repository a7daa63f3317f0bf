use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A brand that influencers are evaluated and ranked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Lowercase key used in file names (`top_100_<name>_reasons.csv`) and
    /// in the brand column of the brand-fit results file.
    pub name: String,
    /// Title shown in the dashboard; defaults to the capitalized `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free-text advertising criteria handed to the evaluator.
    pub criteria: String,
}

impl BrandConfig {
    /// Human-facing label for the brand.
    #[must_use]
    pub fn title(&self) -> String {
        if let Some(display) = self.display_name.as_deref().filter(|d| !d.trim().is_empty()) {
            return display.trim().to_string();
        }
        capitalize(&self.name)
    }

    /// Case-insensitive comparison against a brand value read from a CSV cell.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(raw.trim())
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandConfig>,
}

impl BrandsFile {
    /// Look up a configured brand by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BrandConfig> {
        self.brands.iter().find(|b| b.matches(name))
    }

    /// Brand names in configuration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Load and validate the brands configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let brands_file: BrandsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::BrandsFileParse)?;

    validate_brands(&brands_file)?;

    Ok(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    if brands_file.brands.is_empty() {
        return Err(ConfigError::Validation(
            "at least one brand must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for brand in &brands_file.brands {
        let name = brand.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        // Names become part of input file names.
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "brand '{name}' may only contain ASCII letters, digits, '-' or '_'"
            )));
        }

        if brand.criteria.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{name}' has empty criteria"
            )));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{name}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
