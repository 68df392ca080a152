//! vidgrab - preview and download videos through a vidgrab backend
//!
//! Terminal front-end for the preview & download controller: every command
//! feeds UI events into the controller and draws the resulting view model.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use path_absolutize::Absolutize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::Level;
use vidgrab::controller::{Message, Outcome, PreviewController, ViewModel};
use vidgrab::downloader::progress::PROGRESS_HIDE_DELAY;
use vidgrab::utils::{self, AppSettings, ThemePreference};
use vidgrab::view::{self, palette::Palette};
use vidgrab::HttpBackend;

#[derive(Parser)]
#[command(name = "vidgrab", version, about = "Preview and download videos")]
struct Args {
    /// Backend base URL (overrides settings.json and VIDGRAB_BACKEND_URL)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show title, metadata and the available formats
    Preview { url: String },

    /// Preview, pick a format and save the file
    Download {
        url: String,

        /// Format id to download (defaults to the best listed format)
        #[arg(short, long)]
        format: Option<String>,

        /// Ask the backend to extract audio only
        #[arg(long)]
        audio_only: bool,

        /// Directory to save into (defaults to the configured location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the file once saved
        #[arg(long)]
        open: bool,
    },

    /// Preview, then choose a format interactively
    Fetch {
        url: String,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        open: bool,
    },

    /// Show or change the color theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let rt = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<ExitCode> {
    let theme_path = utils::get_theme_path();
    let theme = ThemePreference::load(&theme_path).await;
    let terminal = Terminal::new(theme);

    match args.command {
        Command::Theme { action } => run_theme(action, theme, &theme_path).await,
        Command::Preview { url } => {
            let (settings, backend) = connect(args.backend, args.timeout).await?;
            let mut ctrl = PreviewController::new(backend, settings.download_location)
                .with_theme(theme, Some(theme_path));
            Ok(exit_code(load_preview(&mut ctrl, &terminal, url).await))
        }
        Command::Download {
            url,
            format,
            audio_only,
            output,
            open,
        } => {
            let (settings, backend) = connect(args.backend, args.timeout).await?;
            let dir = output_dir(output, settings.download_location)?;
            let mut ctrl =
                PreviewController::new(backend, dir).with_theme(theme, Some(theme_path));
            if !load_preview(&mut ctrl, &terminal, url).await {
                return Ok(ExitCode::FAILURE);
            }
            if let Some(format_id) = format {
                if terminal.step(&mut ctrl, Message::FormatSelected(format_id)).await.is_none() {
                    return Ok(ExitCode::FAILURE);
                }
            }
            terminal
                .step(&mut ctrl, Message::AudioOnlyToggled(audio_only))
                .await;
            Ok(exit_code(download_selected(&mut ctrl, &terminal, open).await))
        }
        Command::Fetch { url, output, open } => {
            let (settings, backend) = connect(args.backend, args.timeout).await?;
            let dir = output_dir(output, settings.download_location)?;
            let mut ctrl =
                PreviewController::new(backend, dir).with_theme(theme, Some(theme_path));
            if !load_preview(&mut ctrl, &terminal, url).await {
                return Ok(ExitCode::FAILURE);
            }

            tokio::time::sleep(PROGRESS_HIDE_DELAY).await;
            terminal.step(&mut ctrl, Message::HideProgress).await;

            let Some(format_id) = prompt_for_format(ctrl.view()).await? else {
                return Ok(ExitCode::SUCCESS);
            };
            if terminal.step(&mut ctrl, Message::FormatSelected(format_id)).await.is_none() {
                return Ok(ExitCode::FAILURE);
            }
            Ok(exit_code(download_selected(&mut ctrl, &terminal, open).await))
        }
    }
}

/// Settings from disk, environment and flags, plus the client built from them
async fn connect(
    backend_url: Option<String>,
    timeout: Option<u64>,
) -> Result<(AppSettings, Arc<HttpBackend>)> {
    let mut settings = AppSettings::load(&utils::get_settings_path())
        .await
        .context("Failed to load settings")?
        .with_env_overrides();
    if let Some(url) = backend_url {
        settings.backend_url = url;
    }
    if let Some(timeout) = timeout {
        settings.request_timeout_secs = timeout;
    }

    let backend = HttpBackend::new(&settings).context("Failed to set up the backend client")?;
    Ok((settings, Arc::new(backend)))
}

async fn run_theme(action: ThemeAction, current: ThemePreference, path: &Path) -> Result<ExitCode> {
    let next = match action {
        ThemeAction::Show => {
            println!("{}", current);
            return Ok(ExitCode::SUCCESS);
        }
        ThemeAction::Toggle => current.toggled(),
        ThemeAction::Dark => ThemePreference::Dark,
        ThemeAction::Light => ThemePreference::Light,
    };

    next.save(path)
        .await
        .with_context(|| format!("Failed to save theme to {}", path.display()))?;
    println!("{}", next);
    Ok(ExitCode::SUCCESS)
}

/// Submit `url` and print the preview. Returns false on failure.
async fn load_preview(ctrl: &mut PreviewController, terminal: &Terminal, url: String) -> bool {
    terminal.step(ctrl, Message::UrlChanged(url)).await;
    if terminal.step(ctrl, Message::Submit).await.is_none() {
        return false;
    }
    terminal.print_preview(ctrl.view());
    true
}

async fn download_selected(ctrl: &mut PreviewController, terminal: &Terminal, open: bool) -> bool {
    match terminal.step(ctrl, Message::DownloadClicked).await {
        Some(Outcome::Saved(path)) => {
            println!("Saved to {}", path.display());
            if open {
                if let Err(e) = open::that(&path) {
                    tracing::warn!("Failed to open {:?}: {}", path, e);
                }
            }
            true
        }
        Some(_) => true,
        None => false,
    }
}

/// Ask for an option number on stdin. Empty input keeps the current
/// selection, `q` cancels.
async fn prompt_for_format(view: &ViewModel) -> Result<Option<String>> {
    let count = vidgrab::formats::options::flatten_options(&view.format_groups).count();
    if count == 0 {
        return Ok(None);
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout
            .write_all(format!("Select a format [1-{}, Enter = *, q = quit]: ", count).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();

        if line.is_empty() {
            return Ok(view.selected_format_id.clone());
        }
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>().ok().and_then(|n| view::option_by_number(view, n)) {
            Some(option) => return Ok(Some(option.format_id.clone())),
            None => println!("Please enter a number between 1 and {}", count),
        }
    }
}

fn output_dir(output: Option<PathBuf>, default: PathBuf) -> Result<PathBuf> {
    let dir = output.unwrap_or(default);
    Ok(dir
        .absolutize()
        .with_context(|| format!("Invalid output directory {}", dir.display()))?
        .into_owned())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Draws the view model to stdout after each event
struct Terminal {
    palette: Palette,
}

impl Terminal {
    fn new(theme: ThemePreference) -> Self {
        let palette = if std::io::stdout().is_terminal() {
            Palette::for_theme(theme)
        } else {
            Palette::plain()
        };
        Self { palette }
    }

    /// Feed one event and draw the status line. `None` when the event failed.
    async fn step(&self, ctrl: &mut PreviewController, message: Message) -> Option<Outcome> {
        let result = ctrl.update(message).await;
        if !matches!(result, Ok(Outcome::InputUpdated) | Ok(Outcome::ProgressHidden)) {
            self.draw(ctrl.view());
        }
        result.ok()
    }

    fn draw(&self, view: &ViewModel) {
        if let Some(progress) = view::render_progress(view, &self.palette) {
            println!("{}", progress);
        }
        if let Some(status) = view::render_status(view, &self.palette) {
            println!("{}", status);
        }
    }

    fn print_preview(&self, view: &ViewModel) {
        if let Some(preview) = view::render_preview(view, &self.palette) {
            println!("\n{}", preview);
        }
    }
}
