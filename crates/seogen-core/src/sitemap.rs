//! XML sitemap for the generated posts.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Current UTC calendar date; taken once per sitemap build.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Builds a sitemap with the site root first, then one `<url>` per artifact
/// in the given order. Every entry shares `lastmod`.
pub fn build_sitemap<S: AsRef<str>>(base_url: &str, artifact_names: &[S], lastmod: NaiveDate) -> String {
    let base = base_url.trim_end_matches('/');
    let date = lastmod.format("%Y-%m-%d").to_string();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<urlset xmlns=\"{}\">", SITEMAP_NS);

    let root = format!("{}/", base);
    let locs = std::iter::once(root).chain(
        artifact_names
            .iter()
            .map(|name| format!("{}/{}", base, name.as_ref())),
    );
    for loc in locs {
        let _ = write!(
            out,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            escape_xml(&loc),
            date
        );
    }
    out.push_str("</urlset>\n");
    out
}

/// Write the sitemap, creating the parent directory if needed.
pub fn write_sitemap(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write sitemap {}", path.display()))?;
    Ok(())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<loc>` values of a sitemap document, in order.
pub fn sitemap_locs(xml: &str) -> Vec<String> {
    xml.split("<loc>")
        .skip(1)
        .filter_map(|rest| rest.split_once("</loc>").map(|(loc, _)| loc.to_string()))
        .collect()
}
