//! Review dataset file management with optional auto-download.
//!
//! The bow and pooling experiments both read `data/review_5k.csv`. This
//! module checks for the file and, when the `auto-download` feature is
//! enabled, fetches it from the Hugging Face dataset mirror on first use.
//!
//! # Examples
//!
//! ```no_run
//! use sentilab::dataset::ensure_review_data;
//!
//! ensure_review_data("data/review_5k.csv", true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

#[cfg(feature = "auto-download")]
const HF_DATASET_REPO: &str = "dongkwan-kim/small_dataset";
const SOURCE_URL: &str =
    "https://raw.githubusercontent.com/dongkwan-kim/small_dataset/master/review_5k.csv";

/// Make sure the review CSV exists at `path`, downloading it if allowed.
///
/// Without `auto_download` (or without the `auto-download` feature compiled
/// in), a missing file is an error carrying manual download instructions.
pub fn ensure_review_data(path: &str, auto_download: bool) -> Result<(), Box<dyn std::error::Error>> {
    if Path::new(path).exists() {
        return Ok(());
    }

    if !auto_download {
        return Err(format!(
            "Review dataset not found. Expected:\n  - {}\n\nEither:\n1. Download it manually:\n     curl -o {} {}\n2. Enable the 'auto-download' feature and rebuild",
            path, path, SOURCE_URL
        )
        .into());
    }

    #[cfg(feature = "auto-download")]
    {
        println!("Dataset not found locally. Downloading from Hugging Face...");
        download_from_hf(path)?;
        println!("✓ Dataset downloaded successfully");
        Ok(())
    }

    #[cfg(not(feature = "auto-download"))]
    {
        Err("auto-download feature not enabled. Rebuild with --features auto-download".into())
    }
}

#[cfg(feature = "auto-download")]
fn download_from_hf(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    use hf_hub::api::sync::Api;
    use hf_hub::{Repo, RepoType};
    use std::fs;

    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }

    let api = Api::new()?;
    let repo = api.repo(Repo::new(HF_DATASET_REPO.to_string(), RepoType::Dataset));

    let filename = Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or("Invalid dataset filename")?;
    println!("  Downloading {}...", filename);
    let downloaded = repo.get(filename)?;
    fs::copy(&downloaded, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_error_mentions_source() {
        let err = ensure_review_data("data/definitely_not_here.csv", false).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("definitely_not_here.csv"));
        assert!(msg.contains("curl"));
    }
}
