mod config;
mod error;
mod input;
mod logging;
mod model;
mod render;
mod report;
mod scoring;
mod session;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::{ClickPayload, InputError, ProblemCache, parse_click_file};
use crate::model::Click;
use crate::render::{
    fit_square, fit_square_image, make_demo_images, open_image, render_overlay, save_image,
};
use crate::report::{OutputFormat, render_explanation_page};
use crate::report::json::{render_problems_json, render_score_json};
use crate::report::text::{render_problem_list, render_quiz_view, render_score_text};
use crate::scoring::score;
use crate::session::quiz::{self, parse_quiz_command};
use crate::session::spot::{self, parse_spot_command};
use crate::session::{Answer, QuizAction, QuizState, SpotState, SpotTask};

#[derive(Debug, Parser)]
#[command(name = "xray-quiz", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Optional JSON config overriding canvas and ground-truth defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List complete problem folders.
    Scan {
        #[arg(long, default_value = "problems")]
        root: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render one problem's letterboxed images and text.
    Show {
        #[arg(long, default_value = "problems")]
        root: PathBuf,
        /// 1-based problem number.
        #[arg(long)]
        problem: usize,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        answer: Option<Answer>,
    },
    /// Interactive before/after quiz on stdin.
    Quiz {
        #[arg(long, default_value = "problems")]
        root: PathBuf,
    },
    /// Score a JSON array of clicks against the ground truth.
    Score {
        #[arg(long)]
        clicks: PathBuf,
        /// Image whose size is used to rescale display-space clicks.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Interactive spot-the-difference session on stdin.
    Spot {
        #[arg(long)]
        image: PathBuf,
        /// Where to write the feedback overlay on each submit.
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Clicks refer to the letterboxed square canvas, not the source image.
        #[arg(long)]
        letterbox: bool,
    },
    /// Draw ground truth and clicks over an image.
    Overlay {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        clicks: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the bundled normal/lesion demo images.
    MakeImages {
        #[arg(long, default_value = "images")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Scan { root, format } => run_scan(&root, format, &mut out),
        Command::Show {
            root,
            problem,
            out: out_dir,
            answer,
        } => run_show(&root, problem, &out_dir, answer, &config, &mut out),
        Command::Quiz { root } => quiz_loop(&root, &config, stdin.lock(), &mut out),
        Command::Score {
            clicks,
            image,
            format,
        } => run_score(&clicks, image.as_deref(), format, &config, &mut out),
        Command::Spot {
            image,
            overlay,
            letterbox,
        } => spot_loop(
            &image,
            overlay.as_deref(),
            letterbox,
            &config,
            stdin.lock(),
            &mut out,
        ),
        Command::Overlay { image, clicks, out: dest } => {
            run_overlay(&image, &clicks, &dest, &config)
        }
        Command::MakeImages { out: dir } => {
            let (normal, lesion) = make_demo_images(&dir)?;
            writeln!(out, "{}\n{}", normal.display(), lesion.display())?;
            Ok(())
        }
    }
}

fn run_scan(root: &Path, format: OutputFormat, out: &mut impl Write) -> Result<(), AppError> {
    let problems = ProblemCache::new().require(root)?.to_vec();
    match format {
        OutputFormat::Text => out.write_all(render_problem_list(&problems).as_bytes())?,
        OutputFormat::Json => writeln!(out, "{}", render_problems_json(&problems)?)?,
    }
    Ok(())
}

fn run_show(
    root: &Path,
    number: usize,
    out_dir: &Path,
    answer: Option<Answer>,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let problems = ProblemCache::new().require(root)?.to_vec();
    let index = number
        .checked_sub(1)
        .filter(|&i| i < problems.len())
        .ok_or(InputError::UnknownProblem {
            index: number,
            available: problems.len(),
        })?;
    let problem = &problems[index];

    let left = fit_square(&problem.image_left, config.box_size, config.background)?;
    let right = fit_square(&problem.image_right, config.box_size, config.background)?;
    save_image(&left.canvas, &out_dir.join("left.png"))?;
    save_image(&right.canvas, &out_dir.join("right.png"))?;
    tracing::info!(problem = %problem.folder, out = %out_dir.display(), "rendered problem");

    writeln!(out, "{}", problem.title)?;
    if answer.is_some() {
        writeln!(out, "\n{}", problem.explanation)?;
        let page = out_dir.join("explanation.html");
        std::fs::write(&page, render_explanation_page(&problem.title, &problem.explanation))?;
        tracing::debug!(path = %page.display(), "wrote explanation");
    }
    Ok(())
}

fn quiz_loop(
    root: &Path,
    config: &AppConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let mut cache = ProblemCache::new();
    let mut problems = cache.require(root)?.to_vec();
    let mut state = QuizState::default();
    out.write_all(render_quiz_view(&problems, &state, config.button_max).as_bytes())?;

    for line in input.lines() {
        let line = line?;
        if matches!(line.trim(), "quit" | "q") {
            break;
        }
        let Some(action) = parse_quiz_command(&line) else {
            writeln!(out, "commands: 1-{} | o | x | reload | quit", config.button_max)?;
            continue;
        };
        if action == QuizAction::Reload {
            cache.clear();
            problems = cache.require(root)?.to_vec();
            tracing::info!(count = problems.len(), scans = cache.scans(), "reloaded problems");
        }
        state = quiz::apply(state, action, problems.len(), config.button_max);
        out.write_all(render_quiz_view(&problems, &state, config.button_max).as_bytes())?;
    }
    Ok(())
}

/// Image dimensions used to map display-space clicks; without an image the
/// clicks are taken as image pixels already.
fn image_size(image: Option<&Path>) -> Result<Option<(u32, u32)>, AppError> {
    let Some(path) = image else {
        return Ok(None);
    };
    let img = open_image(path)?;
    Ok(Some((img.width(), img.height())))
}

fn to_clicks(payloads: &[ClickPayload], size: Option<(u32, u32)>) -> Vec<Click> {
    payloads.iter().filter_map(|p| p.to_click(size)).collect()
}

fn run_score(
    clicks_path: &Path,
    image: Option<&Path>,
    format: OutputFormat,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let payloads = parse_click_file(clicks_path)?;
    let clicks = to_clicks(&payloads, image_size(image)?);
    if clicks.len() < payloads.len() {
        tracing::info!(dropped = payloads.len() - clicks.len(), "dropped malformed clicks");
    }
    let result = score(&clicks, &config.rects, config.radius);
    match format {
        OutputFormat::Text => out.write_all(render_score_text(&result, None).as_bytes())?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            render_score_json(&result, config.radius, config.rects.len(), None)?
        )?,
    }
    Ok(())
}

fn spot_loop(
    image_path: &Path,
    overlay: Option<&Path>,
    letterbox: bool,
    config: &AppConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let base = open_image(image_path)?;
    let task = SpotTask {
        rects: config.rects.clone(),
        radius: config.radius,
        image_size: (base.width(), base.height()),
        view: letterbox.then(|| fit_square_image(&base, config.box_size, config.background)),
    };
    let mut state = SpotState::new(Instant::now());

    for line in input.lines() {
        let line = line?;
        if matches!(line.trim(), "quit" | "q") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let Some(action) = parse_spot_command(&line) else {
            continue;
        };
        let (next, outcome) = spot::apply(state, action, &task, Instant::now());
        state = next;
        if let Some(outcome) = outcome {
            out.write_all(render_score_text(&outcome.score, Some(outcome.elapsed)).as_bytes())?;
            if let Some(path) = overlay {
                let img = render_overlay(&base, &task.rects, &state.clicks);
                save_image(&img, path)?;
            }
        }
    }
    Ok(())
}

fn run_overlay(
    image: &Path,
    clicks_path: &Path,
    dest: &Path,
    config: &AppConfig,
) -> Result<(), AppError> {
    let base = open_image(image)?;
    let payloads = parse_click_file(clicks_path)?;
    let clicks = to_clicks(&payloads, Some((base.width(), base.height())));
    let img = render_overlay(&base, &config.rects, &clicks);
    save_image(&img, dest)?;
    tracing::info!(out = %dest.display(), clicks = clicks.len(), "wrote overlay");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
