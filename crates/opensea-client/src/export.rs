// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! One-shot export of response bodies to disk

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{OpenseaError, OpenseaResult};

/// Write `contents` to `path`, creating the file or truncating an existing one
///
/// The bytes are written exactly as received from the API.
pub async fn export_file(path: impl AsRef<Path>, contents: &[u8]) -> OpenseaResult<()> {
    let path = path.as_ref();

    fs::write(path, contents)
        .await
        .map_err(|source| OpenseaError::Export {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = contents.len(), "exported response body");
    Ok(())
}
