//! `seogen sitemap-preview` – render a sitemap for given filenames.

use anyhow::Result;
use seogen_core::config::{normalize_base_url, DEFAULT_SITE_BASE_URL, ENV_SITE_BASE_URL};
use seogen_core::sitemap;

pub fn run_sitemap_preview(names: &[String], base_url: Option<&str>) -> Result<()> {
    let raw = match base_url {
        Some(u) => u.to_string(),
        None => std::env::var(ENV_SITE_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string()),
    };
    let base = normalize_base_url(raw.trim())?;
    print!("{}", sitemap::build_sitemap(&base, names, sitemap::today_utc()));
    Ok(())
}
