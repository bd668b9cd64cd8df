// 🗂️ Site Content - Plain records, authored once
// Everything the renderer shows. Lists stay in the order they were written:
// no sorting, filtering or deduplication anywhere.

use crate::icons::Icon;
use crate::typewriter::{TypewriterConfig, TypewriterTimings};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,

    /// Internal path ("/projects/x") or full URL
    pub href: String,

    /// External links open in a new tab
    #[serde(default)]
    pub is_external: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    pub icon: Icon,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub event: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: Icon,
    pub href: String,
    pub label: String,
}

/// A page that is nothing but a full-viewport frame onto another site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedPage {
    pub slug: String,
    pub title: String,
    pub src: String,
}

impl EmbedPage {
    /// Site path this page is served under
    pub fn path(&self) -> String {
        format!("/projects/{}", self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Static text before the animated name
    pub greeting: String,

    /// Typed and erased in a loop
    pub name: String,

    pub tagline: String,
}

// ============================================================================
// SITE CONTENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub owner: String,
    pub hero: Hero,

    #[serde(default)]
    pub about: Vec<String>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub skills: Vec<Skill>,

    #[serde(default)]
    pub achievements: Vec<Achievement>,

    #[serde(default)]
    pub education: Vec<Education>,

    #[serde(default)]
    pub social_links: Vec<SocialLink>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,

    #[serde(default)]
    pub embeds: Vec<EmbedPage>,

    #[serde(default)]
    pub typewriter: TypewriterTimings,
}

impl SiteContent {
    /// Load content from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read content file: {:?}", path.as_ref()))?;

        let content = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse content file: {:?}", path.as_ref()))?;

        info!(
            path = ?path.as_ref(),
            projects = content.projects.len(),
            embeds = content.embeds.len(),
            "loaded site content"
        );
        Ok(content)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let content: Self = serde_json::from_str(raw).context("Invalid site content JSON")?;
        content.check_slugs()?;
        Ok(content)
    }

    /// Embed slugs become both a URL segment and a directory name
    fn check_slugs(&self) -> Result<()> {
        for page in &self.embeds {
            if !is_valid_slug(&page.slug) {
                bail!(
                    "Invalid embed slug {:?}: use only letters, digits, '-' and '_'",
                    page.slug
                );
            }
        }
        Ok(())
    }

    /// Content file if given, built-in content otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Find an embed page by slug
    pub fn embed(&self, slug: &str) -> Option<&EmbedPage> {
        self.embeds.iter().find(|page| page.slug == slug)
    }

    /// Animator configuration for the hero name
    pub fn typewriter_config(&self) -> TypewriterConfig {
        TypewriterConfig::new(self.hero.name.clone()).with_timings(self.typewriter)
    }

    /// The site as it ships
    pub fn builtin() -> Self {
        SiteContent {
            owner: "Hari Haran".to_string(),
            hero: Hero {
                greeting: "Hi, I'm".to_string(),
                name: "Hari Haran".to_string(),
                tagline: "I build things for the web. Currently exploring supply chain intelligence and data visualization.".to_string(),
            },
            about: vec![
                "I'm a developer passionate about building tools that make complex data accessible. \
                 When I'm not coding, you'll find me reading about geopolitics, supply chains, and emerging technologies."
                    .to_string(),
            ],
            projects: vec![Project {
                title: "Chokepoint".to_string(),
                description: "Critical Materials Risk Dashboard — Track supply chain vulnerabilities for strategic materials like lithium, cobalt, and rare earths.".to_string(),
                tags: strings(&["React", "TypeScript", "Supabase", "Tailwind"]),
                href: "/projects/chokepoint".to_string(),
                is_external: false,
                date: None,
            }],
            skills: vec![
                Skill {
                    title: "Frontend".to_string(),
                    icon: Icon::Layout,
                    items: strings(&["React", "TypeScript", "Tailwind"]),
                },
                Skill {
                    title: "Data".to_string(),
                    icon: Icon::Database,
                    items: strings(&["Supabase", "Data Visualization"]),
                },
            ],
            achievements: Vec::new(),
            education: Vec::new(),
            social_links: vec![
                SocialLink {
                    icon: Icon::Github,
                    href: "https://github.com/s-hari-haran".to_string(),
                    label: "GitHub".to_string(),
                },
                SocialLink {
                    icon: Icon::Linkedin,
                    href: "https://linkedin.com/in/real-hari-haran".to_string(),
                    label: "LinkedIn".to_string(),
                },
                SocialLink {
                    icon: Icon::Mail,
                    href: "mailto:realhariaharan@gmail.com".to_string(),
                    label: "Email".to_string(),
                },
            ],
            resume_url: None,
            embeds: vec![EmbedPage {
                slug: "chokepoint".to_string(),
                title: "Chokepoint Dashboard".to_string(),
                src: "https://chokepoint.vercel.app".to_string(),
            }],
            typewriter: TypewriterTimings::default(),
        }
    }
}

/// Non-empty, `[A-Za-z0-9_-]` only
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// TESTS
// ============================================================================
