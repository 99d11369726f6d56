use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use espbootfix::constants::DEFAULT_BOOTLOADER_PATH;

#[derive(clap::Parser)]
#[command(
    name = "espbootfix",
    about = "Force the flash size and DIO mode in an ESP32 bootloader image header"
)]
struct Cli {
    /// The bootloader image to patch in place
    #[arg(default_value = DEFAULT_BOOTLOADER_PATH)]
    path: PathBuf,
    /// Flash size in MB (4, 8 or 16), detected from sdkconfig when omitted
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,
    /// Directory containing sdkconfig and sdkconfig.defaults
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
    /// Print debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    match espbootfix::patch_image(&cli.path, cli.size, &cli.config_dir) {
        Ok(patch) => {
            log::info!(
                "Bootloader {} fixed: 0x{:02x} -> 0x{:02x}",
                patch.path.display(),
                patch.old.raw(),
                patch.new.raw()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to fix bootloader: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
