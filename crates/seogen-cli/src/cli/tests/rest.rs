//! Tests for topics, sitemap-preview, checksum.

use super::parse;
use clap::Parser;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_topics() {
    match parse(&["seogen", "topics"]) {
        CliCommand::Topics => {}
        _ => panic!("expected Topics"),
    }
}

#[test]
fn cli_parse_sitemap_preview() {
    match parse(&[
        "seogen",
        "sitemap-preview",
        "--name",
        "a.html",
        "--name",
        "b.html",
        "--base-url",
        "https://example.com",
    ]) {
        CliCommand::SitemapPreview { names, base_url } => {
            assert_eq!(names, vec!["a.html", "b.html"]);
            assert_eq!(base_url.as_deref(), Some("https://example.com"));
        }
        _ => panic!("expected SitemapPreview"),
    }
}

#[test]
fn cli_parse_sitemap_preview_no_names() {
    match parse(&["seogen", "sitemap-preview"]) {
        CliCommand::SitemapPreview { names, base_url } => {
            assert!(names.is_empty());
            assert!(base_url.is_none());
        }
        _ => panic!("expected SitemapPreview"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["seogen", "checksum", "generated/post.html"]) {
        CliCommand::Checksum { path } => {
            assert_eq!(path, Path::new("generated/post.html"));
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["seogen"]).is_err());
}
