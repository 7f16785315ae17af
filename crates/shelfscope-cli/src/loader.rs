use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use shelfscope_core::{AppConfig, SeasonArtifact};

/// Where a season document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Pick the artifact source from CLI flags, falling back to the config.
///
/// Precedence: `--file`, `--url`, the config's file override, then the
/// config URL template filled with `--year`/`--season` (or their config
/// defaults).
pub fn resolve_source(
    file: Option<PathBuf>,
    url: Option<String>,
    year: Option<String>,
    season: Option<String>,
    config: &AppConfig,
) -> Result<ArtifactSource> {
    if let Some(path) = file {
        return Ok(ArtifactSource::File(path));
    }
    if let Some(url) = url {
        return Ok(ArtifactSource::Url(url));
    }
    if let Some(path) = &config.source.file {
        return Ok(ArtifactSource::File(PathBuf::from(path)));
    }

    let year = year.unwrap_or_else(|| config.source.year.clone());
    let season = season.unwrap_or_else(|| config.source.season.clone());
    if year.is_empty() || season.is_empty() {
        bail!("no season selected: pass --file/--url, or --year and --season");
    }
    match config.artifact_url(&year, &season) {
        Some(url) => Ok(ArtifactSource::Url(url)),
        None => bail!(
            "no source.url_template configured ({}): pass --file or --url",
            AppConfig::config_path().display()
        ),
    }
}

/// Load and hydrate a season document.
///
/// The engine is never handed unparsed input: a fetch or parse failure
/// stops here, and the caller decides what to do with any previously
/// loaded session.
pub async fn load_artifact(source: &ArtifactSource) -> Result<SeasonArtifact> {
    match source {
        ArtifactSource::File(path) => {
            info!(path = %path.display(), "loading season file");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let artifact = SeasonArtifact::from_json(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            debug!(
                achievements = artifact.achievements.len(),
                "season file hydrated"
            );
            Ok(artifact)
        }
        ArtifactSource::Url(url) => {
            info!(%url, "fetching season file");
            let client = reqwest::Client::builder()
                .user_agent(concat!("shelfscope/", env!("CARGO_PKG_VERSION")))
                .gzip(true)
                .build()
                .context("building HTTP client")?;
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("fetching {url}"))?
                .error_for_status()
                .with_context(|| format!("fetching {url}"))?;
            let text = response.text().await.context("reading response body")?;
            debug!(bytes = text.len(), "season file fetched");
            Ok(SeasonArtifact::from_json(&text).with_context(|| format!("parsing {url}"))?)
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────
