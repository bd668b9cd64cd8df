// 🔣 Icons - Closed set of glyphs
// Every icon the site can show is a variant here. Unknown names fail when the
// content is loaded, never at render time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Github,
    Linkedin,
    Mail,
    ArrowRight,
    ExternalLink,
    FileText,
    Code,
    Database,
    Layout,
    Trophy,
    GraduationCap,
}

/// (icon, SVG body, terminal symbol)
///
/// SVG bodies are drawn on a 24x24 stroke grid.
const GLYPHS: &[(Icon, &str, &str)] = &[
    (
        Icon::Github,
        r#"<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.4 5.4 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4"/><path d="M9 18c-4.51 2-5-2-7-2"/>"#,
        "GH",
    ),
    (
        Icon::Linkedin,
        r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z"/><rect width="4" height="12" x="2" y="9"/><circle cx="4" cy="4" r="2"/>"#,
        "in",
    ),
    (
        Icon::Mail,
        r#"<rect width="20" height="16" x="2" y="4" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#,
        "✉",
    ),
    (
        Icon::ArrowRight,
        r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#,
        "→",
    ),
    (
        Icon::ExternalLink,
        r#"<path d="M15 3h6v6"/><path d="M10 14 21 3"/><path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"/>"#,
        "↗",
    ),
    (
        Icon::FileText,
        r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/><path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M16 13H8"/><path d="M16 17H8"/>"#,
        "📄",
    ),
    (
        Icon::Code,
        r#"<polyline points="16 18 22 12 16 6"/><polyline points="8 6 2 12 8 18"/>"#,
        "</>",
    ),
    (
        Icon::Database,
        r#"<ellipse cx="12" cy="5" rx="9" ry="3"/><path d="M3 5v14a9 3 0 0 0 18 0V5"/><path d="M3 12a9 3 0 0 0 18 0"/>"#,
        "DB",
    ),
    (
        Icon::Layout,
        r#"<rect width="18" height="18" x="3" y="3" rx="2"/><path d="M3 9h18"/><path d="M9 21V9"/>"#,
        "▦",
    ),
    (
        Icon::Trophy,
        r#"<path d="M6 9H4.5a2.5 2.5 0 0 1 0-5H6"/><path d="M18 9h1.5a2.5 2.5 0 0 0 0-5H18"/><path d="M4 22h16"/><path d="M18 2H6v7a6 6 0 0 0 12 0V2Z"/><path d="M12 15v7"/>"#,
        "🏆",
    ),
    (
        Icon::GraduationCap,
        r#"<path d="M22 10v6M2 10l10-5 10 5-10 5z"/><path d="M6 12v5c3 3 9 3 12 0v-5"/>"#,
        "🎓",
    ),
];

impl Icon {
    pub const ALL: [Icon; 11] = [
        Icon::Github,
        Icon::Linkedin,
        Icon::Mail,
        Icon::ArrowRight,
        Icon::ExternalLink,
        Icon::FileText,
        Icon::Code,
        Icon::Database,
        Icon::Layout,
        Icon::Trophy,
        Icon::GraduationCap,
    ];

    fn entry(self) -> Option<&'static (Icon, &'static str, &'static str)> {
        GLYPHS.iter().find(|(icon, _, _)| *icon == self)
    }

    /// Inner SVG markup. Empty if the table has no row for this icon.
    pub fn svg_body(self) -> &'static str {
        self.entry().map(|(_, svg, _)| *svg).unwrap_or("")
    }

    /// Short text stand-in for terminals
    pub fn symbol(self) -> &'static str {
        self.entry().map(|(_, _, symbol)| *symbol).unwrap_or("")
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Github => "github",
            Icon::Linkedin => "linkedin",
            Icon::Mail => "mail",
            Icon::ArrowRight => "arrow-right",
            Icon::ExternalLink => "external-link",
            Icon::FileText => "file-text",
            Icon::Code => "code",
            Icon::Database => "database",
            Icon::Layout => "layout",
            Icon::Trophy => "trophy",
            Icon::GraduationCap => "graduation-cap",
        }
    }
}
