use anyhow::Context;
use clap::{Parser, ValueEnum};
use flapper::assets::{AssetLoader, FileAssetProvider};
use flapper::audio::LogAudio;
use flapper::core::constants::LOG_FILE;
use flapper::core::{Game, GameConfig, Viewport};
use flapper::ui::driver::{play_area, Driver, TerminalGuard};
use flapper::utils::build_info::version_line;
use flapper::utils::logging;
use flapper::utils::persistence::{
    save_path, HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore,
};
use flapper::utils::settings::{DevicePreference, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliDevice {
    Auto,
    Full,
    Constrained,
}

impl From<CliDevice> for DevicePreference {
    fn from(d: CliDevice) -> Self {
        match d {
            CliDevice::Auto => DevicePreference::Auto,
            CliDevice::Full => DevicePreference::Full,
            CliDevice::Constrained => DevicePreference::Constrained,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "flapper",
    about = "Steer through the gaps. Space to flap.",
    disable_version_flag = true
)]
struct Cli {
    /// Device class; `auto` picks from the terminal size
    #[arg(long, value_enum)]
    device: Option<CliDevice>,

    /// Background image (PNG or JPEG)
    #[arg(long)]
    background: Option<PathBuf>,

    /// Player image while gliding
    #[arg(long)]
    sprite_resting: Option<PathBuf>,

    /// Player image right after a flap
    #[arg(long)]
    sprite_flapping: Option<PathBuf>,

    /// Player image after a collision
    #[arg(long)]
    sprite_defeated: Option<PathBuf>,

    /// Start muted
    #[arg(long)]
    mute: bool,

    /// Clear the stored high score and exit
    #[arg(long)]
    reset_high_score: bool,

    /// Print version and exit
    #[arg(short = 'v', long)]
    version: bool,
}

impl Cli {
    /// Command-line values win over the settings file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(device) = self.device {
            settings.device = device.into();
        }
        if self.background.is_some() {
            settings.background = self.background.clone();
        }
        if self.sprite_resting.is_some() {
            settings.sprite_resting = self.sprite_resting.clone();
        }
        if self.sprite_flapping.is_some() {
            settings.sprite_flapping = self.sprite_flapping.clone();
        }
        if self.sprite_defeated.is_some() {
            settings.sprite_defeated = self.sprite_defeated.clone();
        }
        if self.mute {
            settings.muted = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    // Reported before the terminal guard takes the screen. The game runs without a log.
    match save_path(LOG_FILE) {
        Ok(path) => {
            if let Err(e) = logging::init(&path) {
                eprintln!("flapper: logging disabled ({}: {})", path.display(), e);
            }
        }
        Err(e) => eprintln!("flapper: logging disabled ({})", e),
    }
    tracing::info!(version = %version_line(), "starting");

    if cli.reset_high_score {
        let mut store = JsonHighScoreStore::new().context("no data directory for high score")?;
        store
            .reset()
            .with_context(|| format!("failed to remove {}", store.path().display()))?;
        tracing::info!("high score reset");
        println!("High score reset.");
        return Ok(());
    }

    let mut settings = Settings::load();
    cli.apply(&mut settings);

    let store: Box<dyn HighScoreStore> = match JsonHighScoreStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, high score will not persist");
            Box::new(MemoryHighScoreStore::default())
        }
    };

    let (cols, rows) = crossterm::terminal::size().context("failed to read terminal size")?;
    let area = play_area(cols, rows);
    let device = settings.device.resolve(cols, rows);
    let config = GameConfig::resolve(device, Viewport::from_terminal(area.width, area.height));
    let game = Game::new(
        config,
        settings.background_source(),
        settings.sprite_sources(),
        store.load(),
        settings.muted,
        StdRng::from_entropy(),
    );

    let audio = LogAudio::new(settings.muted);
    let loader = AssetLoader::new(Arc::new(FileAssetProvider));
    let mut driver = Driver::new(game, audio, store, loader, settings, cols, rows);

    let guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    let result = driver.run(&mut terminal);
    drop(guard);

    result.context("game loop failed")?;
    println!("Thanks for playing! Best: {}", driver.game.high_score());
    Ok(())
}
