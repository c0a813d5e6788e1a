use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fwpack",
    version,
    about = "Post-build firmware packaging — release manifest and distribution zip for ESP32 build pipelines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Package the current build into a distribution zip
    Pack(PackArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    /// Project root containing platformio.ini and .pio/build/
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Project configuration file, relative to --project-dir
    #[arg(long, default_value = "platformio.ini")]
    pub config: PathBuf,

    /// Project section naming the build environment and platform
    #[arg(long, default_value = "fwpack")]
    pub section: String,

    /// Version header, relative to --project-dir
    #[arg(long, default_value = "include/version.h")]
    pub version_header: PathBuf,

    /// Output directory, relative to --project-dir (wiped on every run)
    #[arg(long, default_value = "firmware")]
    pub output: PathBuf,

    /// Archive name prefix: <name>-<platform>-<version>.zip
    #[arg(long, default_value = "fwpack")]
    pub name: String,
}
