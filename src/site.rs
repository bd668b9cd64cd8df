// 🏗️ Static Build
// Writes every page the renderer knows about into an output directory, so the
// site can be dropped on any file server.

use crate::render::SiteRenderer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One page of the built site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    /// Path relative to the output directory
    pub relative: PathBuf,
    pub html: String,
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub bytes: usize,
}

/// Home page first, then one page per embed, in authored order
pub fn pages(renderer: &SiteRenderer) -> Vec<PageFile> {
    let mut pages = vec![PageFile {
        relative: PathBuf::from("index.html"),
        html: renderer.render_home().into_string(),
    }];

    for embed in &renderer.content().embeds {
        pages.push(PageFile {
            relative: Path::new("projects").join(&embed.slug).join("index.html"),
            html: renderer.render_embed(embed).into_string(),
        });
    }

    pages
}

/// Render and write the whole site under `out_dir`
pub fn build_site(renderer: &SiteRenderer, out_dir: &Path) -> Result<BuildReport> {
    let mut report = BuildReport {
        out_dir: out_dir.to_path_buf(),
        ..Default::default()
    };

    for page in pages(renderer) {
        let target = out_dir.join(&page.relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(&target, &page.html)
            .with_context(|| format!("Failed to write page: {:?}", target))?;
        debug!(path = ?target, bytes = page.html.len(), "wrote page");

        report.bytes += page.html.len();
        report.written.push(target);
    }

    info!(out_dir = ?out_dir, pages = report.written.len(), "site built");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;

    #[test]
    fn test_pages_for_builtin_site() {
        let renderer = SiteRenderer::new(SiteContent::builtin(), 2026);
        let pages = pages(&renderer);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].relative, PathBuf::from("index.html"));
        assert_eq!(pages[1].relative, PathBuf::from("projects/chokepoint/index.html"));
        assert!(pages[1].html.contains("https://chokepoint.vercel.app"));
    }

    #[test]
    fn test_build_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SiteRenderer::new(SiteContent::builtin(), 2026);

        let report = build_site(&renderer, dir.path()).unwrap();

        assert_eq!(report.written.len(), 2);
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains("Hari Haran"));
        assert!(dir.path().join("projects/chokepoint/index.html").is_file());
        assert_eq!(report.bytes, report.written.iter().map(|p| fs::read(p).unwrap().len()).sum::<usize>());
    }

    #[test]
    fn test_build_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SiteRenderer::new(SiteContent::builtin(), 2026);

        build_site(&renderer, dir.path()).unwrap();
        let first = fs::read_to_string(dir.path().join("index.html")).unwrap();
        build_site(&renderer, dir.path()).unwrap();
        let second = fs::read_to_string(dir.path().join("index.html")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_escaping_slug_never_reaches_disk() {
        let raw = r#"{
            "owner": "O",
            "hero": { "greeting": "", "name": "N", "tagline": "" },
            "embeds": [ { "slug": "../escaped", "title": "T", "src": "https://t.example" } ]
        }"#;
        assert!(SiteContent::from_json(raw).is_err());
    }

    #[test]
    fn test_built_pages_stay_under_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let content = SiteContent::from_json(include_str!("../content/sample.json")).unwrap();
        let report = build_site(&SiteRenderer::new(content, 2026), dir.path()).unwrap();

        assert_eq!(report.written.len(), 2);
        for path in &report.written {
            assert!(path.starts_with(dir.path()));
            assert!(!path.components().any(|c| c == std::path::Component::ParentDir));
        }
    }

    #[test]
    fn test_build_into_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let renderer = SiteRenderer::new(SiteContent::builtin(), 2026);

        assert!(build_site(&renderer, file.path()).is_err());
    }
}
