// Portfolio Site - Core Library
// Exposes all modules for use in the CLI/TUI preview, the web server, and tests

pub mod content;    // Site data: projects, skills, links, embed pages
pub mod icons;      // Closed icon set + glyph table
pub mod logging;    // tracing subscriber setup shared by both binaries
pub mod render;     // HTML rendering (maud)
pub mod site;       // Static build into an output directory
pub mod typewriter; // Text cycle animator

// Re-export commonly used types
pub use content::{
    Achievement, Education, EmbedPage, Hero, Project, SiteContent, Skill, SocialLink,
};
pub use icons::Icon;
pub use render::{LinkAttrs, SiteRenderer};
pub use site::{build_site, BuildReport, PageFile};
pub use typewriter::{
    Animator, Caret, DeadlineScheduler, Frame, Phase, Scheduler, TextCycle, TimerId,
    TypewriterConfig, TypewriterTimings, PAUSE_AFTER_ERASE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current local year, for the footer
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
