//! Image bindings given on the command line.

use std::io::Read;

use anyhow::{bail, Context as _};
use base64::Engine as _;
use footlights::{is_emittable, AssetMap};

/// Parses a `HANDLE=TOKEN` pair.
pub fn parse_asset(text: &str) -> Result<(String, String), String> {
    let (handle, token) = text
        .split_once('=')
        .ok_or_else(|| format!("expected HANDLE=TOKEN, got '{}'", text))?;
    if handle.is_empty() {
        return Err("asset handle must not be empty".to_string());
    }
    if !is_emittable(token) {
        return Err(format!(
            "asset token '{}' is empty or contains whitespace, quotes or markup characters",
            token
        ));
    }
    Ok((handle.to_string(), token.to_string()))
}

/// Encodes image bytes as a PNG data URI.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Builds the asset map from `--asset` pairs and an optional stdin image.
pub fn build_asset_map(
    pairs: &[(String, String)],
    stdin_image: Option<&str>,
    mut stdin: impl Read,
) -> anyhow::Result<AssetMap> {
    let mut assets = AssetMap::new();
    for (handle, token) in pairs {
        assets.insert(handle.as_str(), token.as_str());
    }
    if let Some(handle) = stdin_image {
        let mut bytes = Vec::new();
        stdin
            .read_to_end(&mut bytes)
            .context("failed to read image bytes from stdin")?;
        if bytes.is_empty() {
            bail!("no image bytes on stdin for handle '{}'", handle);
        }
        log::debug!("bound {} byte(s) from stdin to '{}'", bytes.len(), handle);
        assets.insert(handle, png_data_uri(&bytes));
    }
    Ok(assets)
}
