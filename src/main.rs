use clap::{CommandFactory, Parser};
use env_logger::Env;
use std::path::PathBuf;

use wavmark::config::{ViewerConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wavmark::input::{load_wav, DecodeOptions};
use wavmark::markers::MarkerTrigger;
use wavmark::state::ViewerState;
use wavmark::viewer;
use wavmark::ViewerError;

/// Plot a 16-bit PCM WAV file and mark sample positions on it
#[derive(Parser, Debug)]
#[command(name = "wavmark")]
#[command(version, about, long_about = None)]
struct Args {
    /// WAV file to display
    #[arg(value_name = "WAV_FILE")]
    input_file: Option<PathBuf>,

    /// Reject files that are not 16-bit mono PCM
    #[arg(long)]
    strict: bool,

    /// Stop decoding at the data chunk's declared size
    #[arg(long)]
    bound_data: bool,

    /// When hovering the plot places a marker
    #[arg(long, value_enum, default_value_t = MarkerTrigger::Hover)]
    marker_mode: MarkerTrigger,

    /// Window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f32,

    /// Window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> wavmark::Result<ViewerConfig> {
        let input = self.input_file.ok_or(ViewerError::Argument)?;
        Ok(ViewerConfig {
            input,
            decode: DecodeOptions {
                strict_format: self.strict,
                bound_to_data_size: self.bound_data,
            },
            trigger: self.marker_mode,
            window_size: [self.width, self.height],
        })
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            log::debug!("{} ({})", e, e.kind());
            println!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
    };

    let audio = match load_wav(&config.input, config.decode) {
        Ok(audio) => audio,
        Err(e) => {
            println!("Error loading WAV file: {}", e);
            std::process::exit(1);
        }
    };

    let state = ViewerState::new(audio, config.trigger);
    if let Err(e) = viewer::run(&config, state) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
