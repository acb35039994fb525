//! `seogen checksum` – SHA-256 of a generated post.

use anyhow::Result;
use seogen_core::checksum;
use std::path::Path;

pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::sha256_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
