//! `fieldfit`: headless auto-size run.
//!
//! Builds a page with one text input and one textarea, binds both, types the
//! command-line text into them (the input gets its first line) and prints
//! the sizes the controls settle on.

mod config;

use autosize::{HeightOverrides, WidthOverrides};
use config::Settings;
use gfx::EguiTextMeasurer;
use log::{info, warn};
use mimalloc::MiMalloc;
use page::{EngineProfile, Page};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_TEXT: &str = "hello autosize\nsecond line\n";

fn run(settings: &Settings, text: &str) -> Result<(), dom::DomError> {
    let profile = if settings.legacy {
        EngineProfile::legacy()
    } else {
        EngineProfile::modern()
    };
    info!("profile: {}", profile.name);
    let mut page = Page::with_measurer(profile, Box::new(EguiTextMeasurer::headless()));

    let input = page.add_input("")?;
    let area = page.add_textarea("")?;
    if let Some(width) = settings.textarea_width {
        page.set_style(area, "width", &format!("{width}px"))?;
    }

    page.apply_auto_width(
        &[input],
        WidthOverrides {
            padding_chars: settings.padding_chars,
        },
    );
    page.apply_auto_height(
        &[area],
        HeightOverrides {
            padding_lines: settings.padding_lines,
            double_read: settings.double_read,
        },
    );

    let first_line = text.lines().next().unwrap_or_default();
    page.type_text(input, first_line)?;
    page.type_text(area, text)?;
    let ticks = page.run_until_idle();

    let stats = page.stats();
    println!("input     {:>8.1}px wide  {:?}", page.width(input), first_line);
    println!("textarea  {:>8.1}px tall  ({} lines typed)", page.height(area), text.lines().count());
    println!(
        "quirks    scrollbar allowance defect: {}",
        page.quirks().is_some_and(|q| q.scrollbar_allowance_bug)
    );
    println!(
        "probes    {} created, {} discarded, {} layout reads, {ticks} ticks",
        stats.created, stats.discarded, stats.layout_reads
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let settings = Settings::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        args.join(" ").replace("\\n", "\n")
    };
    match run(&settings, &text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("run failed: {err}");
            eprintln!("fieldfit: {err}");
            ExitCode::FAILURE
        }
    }
}
