// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

// Use library instead of local modules
use portfolio::{build_site, current_year, logging, SiteContent, SiteRenderer};

/// Flags shared by every mode
struct Options {
    content: Option<PathBuf>,
    out: PathBuf,
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options {
        content: None,
        out: PathBuf::from("dist"),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--content" => {
                let value = iter.next().context("--content needs a file path")?;
                options.content = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = iter.next().context("--out needs a directory")?;
                options.out = PathBuf::from(value);
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "build" {
        // Build mode
        logging::init_tracing("info");
        let options = parse_options(&args[2..])?;
        run_build(&options)?;
    } else {
        // Preview mode (default). Quiet logs: stderr shares the terminal.
        logging::init_tracing("warn");
        let options = parse_options(&args[1..])?;
        run_ui_mode(&options)?;
    }

    Ok(())
}

fn run_build(options: &Options) -> Result<()> {
    println!("🏗️  Building portfolio site");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load content
    println!("\n📂 Loading content...");
    let content = SiteContent::load(options.content.as_deref())?;
    match &options.content {
        Some(path) => println!("✓ Loaded {:?}", path),
        None => println!("✓ Using built-in content"),
    }
    println!(
        "  {} projects, {} skills, {} links, {} embedded pages",
        content.projects.len(),
        content.skills.len(),
        content.social_links.len(),
        content.embeds.len()
    );

    // 2. Render + write
    println!("\n🖨️  Rendering pages...");
    let renderer = SiteRenderer::new(content, current_year());
    let report = build_site(&renderer, &options.out)?;
    for path in &report.written {
        println!("✓ {}", path.display());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "🎉 Wrote {} pages ({} bytes) to {}",
        report.written.len(),
        report.bytes,
        report.out_dir.display()
    );

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(options: &Options) -> Result<()> {
    println!("🖥️  Loading portfolio preview...\n");

    let content = SiteContent::load(options.content.as_deref())?;
    println!("Starting preview... (Press 'q' to quit)\n");

    let mut app = ui::App::new(content, current_year());
    ui::run_ui(&mut app)?;

    println!("\n✅ Preview closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_options: &Options) -> Result<()> {
    eprintln!("❌ Preview mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or build the static site: cargo run -- build");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_options(&[]).unwrap();
        assert!(options.content.is_none());
        assert_eq!(options.out, PathBuf::from("dist"));
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_options(&args(&["--out", "site", "--content", "me.json"])).unwrap();
        assert_eq!(options.out, PathBuf::from("site"));
        assert_eq!(options.content, Some(PathBuf::from("me.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_options(&args(&["--out"])).is_err());
        assert!(parse_options(&args(&["--verbose"])).is_err());
    }
}
