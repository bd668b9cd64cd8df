// 🖼️ Static Content Renderer
// Projects SiteContent into HTML with maud. No state, no transitions: the same
// content and year always produce the same markup.
//
// The only decisions made here:
// - external links open in a new tab with noopener/noreferrer
// - empty sections are left out

use crate::content::{Achievement, Education, EmbedPage, Project, SiteContent, Skill, SocialLink};
use crate::icons::Icon;
use crate::typewriter::{TextCycle, CARET_BLINK};
use maud::{html, Markup, PreEscaped, DOCTYPE};

// ============================================================================
// LINK ATTRIBUTES
// ============================================================================

/// `target`/`rel` pair for an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAttrs {
    pub target: Option<&'static str>,
    pub rel: Option<&'static str>,
}

impl LinkAttrs {
    /// New viewing context, no opener or referrer leak
    pub const EXTERNAL: LinkAttrs = LinkAttrs {
        target: Some("_blank"),
        rel: Some("noopener noreferrer"),
    };

    /// Plain same-tab navigation
    pub const INTERNAL: LinkAttrs = LinkAttrs {
        target: None,
        rel: None,
    };

    pub fn for_project(project: &Project) -> Self {
        if project.is_external {
            Self::EXTERNAL
        } else {
            Self::INTERNAL
        }
    }
}

// ============================================================================
// ASSETS
// ============================================================================

const STYLESHEET: &str = r#"
*{box-sizing:border-box}
body{margin:0;background:#fafaf9;color:#000;font-family:system-ui,sans-serif}
main,.footer-inner{max-width:48rem;margin:0 auto;padding:0 1.5rem}
main{padding-top:5rem;padding-bottom:5rem}
section{margin-bottom:5rem}
h1{font-size:3.5rem;letter-spacing:-.02em;margin:0}
h1 .name{text-decoration:underline;text-decoration-thickness:4px;text-underline-offset:8px}
h2{font-family:monospace;font-size:.75rem;text-transform:uppercase;letter-spacing:.2em;color:#6b7280;margin-bottom:2rem}
.tagline,.muted{color:#6b7280}
.card{display:block;border:4px solid #000;background:#fff;padding:1.5rem;box-shadow:4px 4px 0 #000;color:inherit;text-decoration:none;margin-bottom:1.5rem}
.project-card:hover{transform:translate(2px,2px);box-shadow:2px 2px 0 #000}
.card-head{display:flex;justify-content:space-between;align-items:flex-start}
.card-head h3{margin:0}
.tags{display:flex;flex-wrap:wrap;gap:.5rem;margin-top:1rem}
.tag{border:2px solid #000;background:#f3f4f6;padding:.25rem .5rem;font-family:monospace;font-size:.75rem}
.icon{width:1.25rem;height:1.25rem}
.project-card .arrow{opacity:0;transition:all .2s}
.project-card:hover .arrow{opacity:1;transform:translateX(.25rem)}
footer{border-top:4px solid #000;padding:2rem 0}
.footer-inner{display:flex;justify-content:space-between;align-items:center;gap:1rem}
.social{display:flex;gap:.75rem}
.social a{border:2px solid #000;padding:.75rem;color:inherit;line-height:0}
.social a:hover{background:#000;color:#fff}
.resume{display:inline-flex;gap:.5rem;margin-top:1.5rem;border:2px solid #000;padding:.5rem 1rem;color:inherit;text-decoration:none}
@keyframes blink{50%{opacity:0}}
"#;

/// Steps a precomputed timeline with one pending timeout at a time
const PLAYER_JS: &str = r#"
document.querySelectorAll('.typewriter[data-timeline]').forEach(function (el) {
  var frames = JSON.parse(el.dataset.timeline);
  var text = el.querySelector('.typewriter-text');
  var i = 0, timer = null;
  if (!frames.length || !text) return;
  function step() {
    var frame = frames[i];
    text.textContent = frame.text;
    el.classList.toggle('typing', frame.typing);
    i = (i + 1) % frames.length;
    clearTimeout(timer);
    timer = setTimeout(step, frame.delay_ms);
  }
  step();
});
"#;

const FRAME_STYLE: &str =
    "width:100vw;height:100vh;border:none;position:fixed;top:0;left:0";

fn stylesheet() -> String {
    // Full blink period is two half-periods. The player sets `typing` while
    // characters are being added; the caret holds solid for those frames.
    format!(
        "{}.caret{{animation:blink {}ms step-end infinite;margin-left:2px}}\n\
         .typewriter.typing .caret{{animation:none;opacity:1}}\n",
        STYLESHEET,
        CARET_BLINK.as_millis() * 2
    )
}

// ============================================================================
// RENDERER
// ============================================================================

pub struct SiteRenderer {
    content: SiteContent,
    year: i32,
}

impl SiteRenderer {
    /// `year` is shown in the footer copyright line
    pub fn new(content: SiteContent, year: i32) -> Self {
        SiteRenderer { content, year }
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Resolve a site path to a page
    pub fn render_path(&self, path: &str) -> Option<Markup> {
        match path.trim_end_matches("/index.html") {
            "" | "/" => Some(self.render_home()),
            other => other
                .strip_prefix("/projects/")
                .map(|slug| slug.trim_end_matches('/'))
                .and_then(|slug| self.content.embed(slug))
                .map(|page| self.render_embed(page)),
        }
    }

    pub fn render_home(&self) -> Markup {
        let c = &self.content;

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (c.owner) }
                    style { (PreEscaped(stylesheet())) }
                }
                body {
                    main {
                        (self.hero())

                        @if !c.projects.is_empty() {
                            section #projects {
                                h2 { "Projects" }
                                div.projects {
                                    @for project in &c.projects {
                                        (project_card(project))
                                    }
                                }
                            }
                        }

                        @if !c.about.is_empty() {
                            section #about {
                                h2 { "About" }
                                div.card {
                                    @for paragraph in &c.about {
                                        p.muted { (paragraph) }
                                    }
                                }
                            }
                        }

                        @if !c.skills.is_empty() {
                            section #skills {
                                h2 { "Skills" }
                                div.skills {
                                    @for skill in &c.skills {
                                        (skill_card(skill))
                                    }
                                }
                            }
                        }

                        @if !c.achievements.is_empty() {
                            section #achievements {
                                h2 { "Achievements" }
                                div.achievements {
                                    @for achievement in &c.achievements {
                                        (achievement_card(achievement))
                                    }
                                }
                            }
                        }

                        @if !c.education.is_empty() {
                            section #education {
                                h2 { "Education" }
                                div.education {
                                    @for entry in &c.education {
                                        (education_card(entry))
                                    }
                                }
                            }
                        }
                    }
                    (self.footer())
                    script { (PreEscaped(PLAYER_JS)) }
                }
            }
        }
    }

    fn hero(&self) -> Markup {
        let hero = &self.content.hero;
        let frames = TextCycle::timeline(&self.content.typewriter_config());
        let timeline = serde_json::to_string(&frames).unwrap_or_else(|_| "[]".to_string());

        html! {
            section #hero {
                h1 {
                    (hero.greeting) " "
                    span.name {
                        span class="typewriter" data-timeline=(timeline) {
                            span.typewriter-text { (hero.name) }
                            span.caret aria-hidden="true" { "|" }
                        }
                    }
                }
                p.tagline { (hero.tagline) }
                @if let Some(url) = &self.content.resume_url {
                    a class="resume" href=(url) target=[LinkAttrs::EXTERNAL.target] rel=[LinkAttrs::EXTERNAL.rel] {
                        (icon_svg(Icon::FileText))
                        "Resume"
                    }
                }
            }
        }
    }

    fn footer(&self) -> Markup {
        html! {
            footer {
                div.footer-inner {
                    nav.social {
                        @for link in &self.content.social_links {
                            (social_link(link))
                        }
                    }
                    p.muted { "© " (self.year) " " (self.content.owner) }
                }
            }
        }
    }

    /// Full-viewport frame onto an external site. Nothing is passed to it.
    pub fn render_embed(&self, page: &EmbedPage) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (page.title) }
                }
                body style="margin:0" {
                    iframe src=(page.src) title=(page.title) style=(FRAME_STYLE) {}
                }
            }
        }
    }

    pub fn render_not_found(&self, path: &str) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "Not found" }
                    style { (PreEscaped(stylesheet())) }
                }
                body {
                    main {
                        h1 { "404" }
                        p.muted { "Nothing lives at " code { (path) } "." }
                        a class="resume" href="/" { "Back home" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// CARDS
// ============================================================================

pub fn icon_svg(icon: Icon) -> Markup {
    html! {
        svg class="icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true" data-icon=(icon.name()) {
            (PreEscaped(icon.svg_body()))
        }
    }
}

pub fn project_card(project: &Project) -> Markup {
    let attrs = LinkAttrs::for_project(project);

    html! {
        a class="card project-card" href=(project.href) target=[attrs.target] rel=[attrs.rel] {
            div.card-head {
                h3 { (project.title) }
                span.arrow { (icon_svg(Icon::ArrowRight)) }
            }
            @if let Some(date) = &project.date {
                p.date.muted { (date) }
            }
            p.muted { (project.description) }
            div.tags {
                @for tag in &project.tags {
                    span.tag { (tag) }
                }
            }
        }
    }
}

pub fn skill_card(skill: &Skill) -> Markup {
    html! {
        div class="card skill" {
            div.card-head {
                h3 { (skill.title) }
                (icon_svg(skill.icon))
            }
            div.tags {
                @for item in &skill.items {
                    span.tag { (item) }
                }
            }
        }
    }
}

pub fn achievement_card(achievement: &Achievement) -> Markup {
    html! {
        div class="card achievement" {
            div.card-head {
                h3 { (achievement.title) }
                span.tag { (achievement.year) }
            }
            p.muted { (achievement.event) }
        }
    }
}

pub fn education_card(entry: &Education) -> Markup {
    html! {
        div class="card education-entry" {
            div.card-head {
                h3 { (entry.institution) }
                span.tag { (entry.period) }
            }
            p.muted { (entry.degree) }
        }
    }
}

/// Social links always leave the site
pub fn social_link(link: &SocialLink) -> Markup {
    let attrs = LinkAttrs::EXTERNAL;

    html! {
        a class="social-link" href=(link.href) target=[attrs.target] rel=[attrs.rel] aria-label=(link.label) {
            (icon_svg(link.icon))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Hero;
    use crate::typewriter::TypewriterTimings;

    fn synthetic() -> SiteContent {
        SiteContent {
            owner: "Ada".to_string(),
            hero: Hero {
                greeting: "Hello, I'm".to_string(),
                name: "Ada".to_string(),
                tagline: "Engines & notes".to_string(),
            },
            about: vec![],
            projects: vec![
                Project {
                    title: "Outbound".to_string(),
                    description: "Lives elsewhere".to_string(),
                    tags: vec!["Rust".to_string(), "Wasm".to_string()],
                    href: "https://outbound.example".to_string(),
                    is_external: true,
                    date: Some("2025".to_string()),
                },
                Project {
                    title: "Inbound".to_string(),
                    description: "Lives here".to_string(),
                    tags: vec![],
                    href: "/projects/inbound".to_string(),
                    is_external: false,
                    date: None,
                },
            ],
            skills: vec![
                Skill {
                    title: "Systems".to_string(),
                    icon: Icon::Code,
                    items: vec!["Rust".to_string()],
                },
                Skill {
                    title: "Storage".to_string(),
                    icon: Icon::Database,
                    items: vec!["SQLite".to_string()],
                },
                Skill {
                    title: "Interfaces".to_string(),
                    icon: Icon::Layout,
                    items: vec![],
                },
            ],
            achievements: vec![Achievement {
                title: "First place".to_string(),
                event: "Hack Night".to_string(),
                year: "2024".to_string(),
            }],
            education: vec![],
            social_links: vec![
                SocialLink {
                    icon: Icon::Github,
                    href: "https://github.com/ada".to_string(),
                    label: "GitHub".to_string(),
                },
                SocialLink {
                    icon: Icon::Mail,
                    href: "mailto:ada@example.com".to_string(),
                    label: "Email".to_string(),
                },
                SocialLink {
                    icon: Icon::Linkedin,
                    href: "https://linkedin.com/in/ada".to_string(),
                    label: "LinkedIn".to_string(),
                },
            ],
            resume_url: None,
            embeds: vec![EmbedPage {
                slug: "inbound".to_string(),
                title: "Inbound Dashboard".to_string(),
                src: "https://inbound.example".to_string(),
            }],
            typewriter: TypewriterTimings::default(),
        }
    }

    fn renderer() -> SiteRenderer {
        SiteRenderer::new(synthetic(), 2026)
    }

    // The opening tag that contains `needle`
    fn opening_tag<'a>(html: &'a str, needle: &str) -> &'a str {
        let at = html.find(needle).unwrap_or_else(|| panic!("{} not rendered", needle));
        let start = html[..=at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    fn positions(html: &str, needles: &[&str]) -> Vec<usize> {
        needles
            .iter()
            .map(|n| html.find(n).unwrap_or_else(|| panic!("{} not rendered", n)))
            .collect()
    }

    #[test]
    fn test_external_and_internal_project_links() {
        let html = renderer().render_home().into_string();

        let external = opening_tag(&html, r#"href="https://outbound.example""#);
        assert!(external.contains(r#"target="_blank""#));
        assert!(external.contains(r#"rel="noopener noreferrer""#));

        let internal = opening_tag(&html, r#"href="/projects/inbound""#);
        assert!(!internal.contains("target="));
        assert!(!internal.contains("rel="));
    }

    #[test]
    fn test_social_links_once_each_in_order() {
        let html = renderer().render_home().into_string();

        assert_eq!(html.matches(r#"class="social-link""#).count(), 3);
        let at = positions(&html, &[r#"aria-label="GitHub""#, r#"aria-label="Email""#, r#"aria-label="LinkedIn""#]);
        assert!(at[0] < at[1] && at[1] < at[2]);

        let mail = opening_tag(&html, r#"href="mailto:ada@example.com""#);
        assert!(mail.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_skills_once_each_in_order() {
        let html = renderer().render_home().into_string();

        assert_eq!(html.matches(r#"class="card skill""#).count(), 3);
        let at = positions(&html, &["<h3>Systems</h3>", "<h3>Storage</h3>", "<h3>Interfaces</h3>"]);
        assert!(at[0] < at[1] && at[1] < at[2]);
        assert!(html.contains(r#"data-icon="database""#));
    }

    #[test]
    fn test_tags_in_given_order() {
        let html = renderer().render_home().into_string();
        let at = positions(&html, &[r#"<span class="tag">Rust</span><span class="tag">Wasm</span>"#]);
        assert_eq!(at.len(), 1);
        assert!(html.contains("2025"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let html = renderer().render_home().into_string();

        assert!(!html.contains(r#"id="about""#));
        assert!(!html.contains(r#"id="education""#));
        assert!(html.contains(r#"id="achievements""#));
        assert!(!html.contains(r#"class="resume""#));
    }

    #[test]
    fn test_resume_link_is_external() {
        let mut content = synthetic();
        content.resume_url = Some("https://docs.example/cv.pdf".to_string());
        let html = SiteRenderer::new(content, 2026).render_home().into_string();

        let tag = opening_tag(&html, r#"href="https://docs.example/cv.pdf""#);
        assert!(tag.contains(r#"target="_blank""#));
        assert!(tag.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_hero_and_footer() {
        let html = renderer().render_home().into_string();

        assert!(html.contains("Hello, I&#39;m") || html.contains("Hello, I'm"));
        assert!(html.contains("data-timeline="));
        assert!(html.contains(r#"<span class="typewriter-text">Ada</span>"#));
        assert!(html.contains("© 2026 Ada"));
        assert!(html.contains("Engines &amp; notes"));
    }

    #[test]
    fn test_typing_class_is_styled() {
        let html = renderer().render_home().into_string();

        assert!(html.contains("classList.toggle('typing'"));
        assert!(html.contains(".typewriter.typing .caret{animation:none;opacity:1}"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut content = synthetic();
        content.projects[0].title = "<script>alert(1)</script>".to_string();
        let html = SiteRenderer::new(content, 2026).render_home().into_string();

        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_embed_page() {
        let r = renderer();
        let page = r.content().embed("inbound").unwrap();
        let html = r.render_embed(page).into_string();

        let frame = opening_tag(&html, "<iframe");
        assert!(frame.contains(r#"src="https://inbound.example""#));
        assert!(frame.contains(r#"title="Inbound Dashboard""#));
        assert!(frame.contains("100vw"));
        assert!(frame.contains("position:fixed"));
    }

    #[test]
    fn test_render_path() {
        let r = renderer();

        assert!(r.render_path("/").is_some());
        assert!(r.render_path("/index.html").is_some());
        assert!(r.render_path("/projects/inbound").is_some());
        assert!(r.render_path("/projects/inbound/").is_some());
        assert!(r.render_path("/projects/missing").is_none());
        assert!(r.render_path("/elsewhere").is_none());
    }

    #[test]
    fn test_builtin_site_renders() {
        let r = SiteRenderer::new(SiteContent::builtin(), 2026);
        let html = r.render_home().into_string();

        assert!(html.contains("Chokepoint"));
        let card = opening_tag(&html, r#"href="/projects/chokepoint""#);
        assert!(!card.contains("target="));
        assert!(r.render_path("/projects/chokepoint").is_some());
    }

    #[test]
    fn test_sample_content_renders_every_section() {
        let content = SiteContent::from_json(include_str!("../content/sample.json")).unwrap();
        let html = SiteRenderer::new(content, 2026).render_home().into_string();

        for id in ["hero", "projects", "about", "skills", "achievements", "education"] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing section {}", id);
        }
        assert!(html.contains(r#"class="resume""#));
        assert_eq!(html.matches(r#"class="card education-entry""#).count(), 1);
    }

    #[test]
    fn test_link_attrs() {
        let mut project = synthetic().projects[1].clone();
        assert_eq!(LinkAttrs::for_project(&project), LinkAttrs::INTERNAL);
        project.is_external = true;
        assert_eq!(LinkAttrs::for_project(&project), LinkAttrs::EXTERNAL);
    }
}
