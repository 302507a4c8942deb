use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "uishot", version)]
#[command(about = "Generate widget images from a declarative manifest")]
struct Cli {
    /// Manifest describing the images to generate.
    #[arg(long, default_value = "src/site/image-generator.json")]
    config_file: PathBuf,

    /// Widget theme ('light' or 'dark').
    #[arg(long)]
    look_and_feel: String,

    /// Directory the PNG files are written to.
    #[arg(long, default_value = "target/generated-site/resources/images")]
    output_directory: PathBuf,

    /// Snapshot of the manifest from the last successful run.
    #[arg(long, default_value = "target/generated-site/image-generator.json")]
    saved_config_file: PathBuf,

    /// Fill the panel background with the theme surface color instead of
    /// leaving it transparent.
    #[arg(long)]
    opaque: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let opts = uishot::GeneratorOpts {
        config_file: cli.config_file,
        look_and_feel: cli.look_and_feel,
        output_directory: cli.output_directory,
        saved_config_file: cli.saved_config_file,
        opaque: cli.opaque,
    };

    let stats = uishot::run(&opts)?;
    eprintln!(
        "generated {} image(s), {} up to date",
        stats.rendered.len(),
        stats.skipped
    );
    Ok(())
}
