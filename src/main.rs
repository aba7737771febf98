use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trmnl_pipeline::assets::{AssetLoader, CatalogFile};
use trmnl_pipeline::models::{DeviceKind, OutputFormat, TransformOverrides};
use trmnl_pipeline::services::{BlankBackend, Catalog, TransformPipeline};

#[derive(Parser)]
#[command(name = "trmnl-pipeline")]
#[command(about = "Convert rendered screens into e-ink device images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image for a target device
    Convert {
        /// Source image (PNG, JPEG or BMP)
        input: PathBuf,

        /// Output path (default: <input>_processed.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Device model from the catalog (e.g. "og_png", "amazon_kindle_2024")
        #[arg(short, long)]
        model: Option<String>,

        /// Target width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Target height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Number of grey levels (2..=256)
        #[arg(long)]
        colors: Option<u32>,

        /// Output bit depth (1..=8)
        #[arg(long)]
        bit_depth: Option<u32>,

        /// Clockwise rotation in degrees (multiple of 90)
        #[arg(long, allow_hyphen_values = true)]
        rotation: Option<i32>,

        /// Horizontal offset in pixels
        #[arg(long, allow_hyphen_values = true)]
        offset_x: Option<i32>,

        /// Vertical offset in pixels
        #[arg(long, allow_hyphen_values = true)]
        offset_y: Option<i32>,

        /// Output format: "png" or "bmp"
        #[arg(short, long)]
        format: Option<String>,

        /// Color table as comma-separated hex RGB, darkest first (e.g. "#000000,#FFFFFF")
        #[arg(long, conflicts_with = "palette")]
        colormap: Option<String>,

        /// Use a catalog palette as the color table (e.g. "gray-4")
        #[arg(long)]
        palette: Option<String>,

        /// Plain nearest-level quantization instead of Floyd-Steinberg
        #[arg(long)]
        no_dither: bool,

        /// Write a white canvas of the target size instead of the source
        #[arg(long)]
        blank: bool,
    },
    /// List device models in the catalog
    Models {
        /// Only show models of this kind ("trmnl", "kindle", "byod")
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// List palettes in the catalog
    Palettes,
    /// Show catalog sources and environment
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trmnl_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let loader = AssetLoader::from_env();

    match cli.command {
        Commands::Convert {
            input,
            output,
            model,
            width,
            height,
            colors,
            bit_depth,
            rotation,
            offset_x,
            offset_y,
            format,
            colormap,
            palette,
            no_dither,
            blank,
        } => {
            let overrides = TransformOverrides {
                width,
                height,
                colors,
                bit_depth,
                rotation,
                offset_x,
                offset_y,
                format: format.as_deref().map(parse_format).transpose()?,
                colormap: colormap.as_deref().map(parse_colormap),
                dither: no_dither.then_some(false),
            };
            run_convert_command(
                &loader,
                &input,
                output,
                model.as_deref(),
                overrides,
                palette.as_deref(),
                blank,
            )
        }
        Commands::Models { kind } => run_models_command(&loader, kind.as_deref()),
        Commands::Palettes => run_palettes_command(&loader),
        Commands::Status => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn parse_format(s: &str) -> anyhow::Result<OutputFormat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "png" | "image/png" => Ok(OutputFormat::Png),
        "bmp" | "image/bmp" => Ok(OutputFormat::Bmp),
        other => anyhow::bail!("Unknown output format '{other}' (expected png or bmp)"),
    }
}

fn parse_colormap(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

fn run_convert_command(
    loader: &AssetLoader,
    input: &std::path::Path,
    output: Option<PathBuf>,
    model: Option<&str>,
    mut overrides: TransformOverrides,
    palette: Option<&str>,
    blank: bool,
) -> anyhow::Result<()> {
    // The catalog is only needed for --model or --palette
    let catalog = if model.is_some() || palette.is_some() {
        Some(Catalog::load(loader)?)
    } else {
        None
    };

    if let (Some(id), Some(catalog)) = (palette, catalog.as_ref()) {
        let spec = catalog
            .palette_by_id(id)
            .ok_or_else(|| anyhow::anyhow!("Palette '{id}' not found in palettes data"))?;
        overrides = overrides.with_palette(spec)?;
    }

    let mut pipeline = match (model, catalog.as_ref()) {
        (Some(name), Some(catalog)) => TransformPipeline::for_model(catalog, name, &overrides)?,
        _ => TransformPipeline::resolve(&overrides, None)?,
    };
    if blank {
        pipeline = pipeline.backend(Arc::new(BlankBackend));
    }

    let (path, encoded) = pipeline.process_file(input, output.as_deref())?;
    println!(
        "{} -> {} ({}x{}, {} bytes)",
        input.display(),
        path.display(),
        encoded.width,
        encoded.height,
        encoded.len()
    );
    Ok(())
}

fn run_models_command(loader: &AssetLoader, kind: Option<&str>) -> anyhow::Result<()> {
    let catalog = Catalog::load(loader)?;

    let profiles = match kind {
        Some(k) => match DeviceKind::parse(k) {
            DeviceKind::Unknown => anyhow::bail!("Unknown device kind '{k}'"),
            kind => catalog.profiles_by_kind(kind),
        },
        None => catalog.profiles().iter().collect(),
    };

    println!(
        "{:<28} {:>11} {:>6} {:>4} {:>4}  {:<6} {}",
        "NAME", "SIZE", "COLORS", "BITS", "ROT", "FORMAT", "PALETTES"
    );
    for p in profiles {
        println!(
            "{:<28} {:>11} {:>6} {:>4} {:>4}  {:<6} {}",
            p.name,
            format!("{}x{}", p.width, p.height),
            p.colors,
            p.bit_depth,
            p.rotation,
            p.output_format().extension(),
            p.palette_ids.join(",")
        );
    }
    Ok(())
}

fn run_palettes_command(loader: &AssetLoader) -> anyhow::Result<()> {
    let catalog = Catalog::load(loader)?;

    for spec in catalog.palettes() {
        let colors = match spec.palette() {
            Ok(palette) if spec.has_explicit_colors() => palette.to_hex().join(" "),
            Ok(_) => format!("{} greys", spec.grays),
            Err(e) => format!("invalid ({e})"),
        };
        println!("{:<10} {:<24} {colors}", spec.id, spec.name);
    }
    Ok(())
}

/// Display catalog sources and environment
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("trmnl-pipeline v{VERSION}\n");

    println!("Environment Variables:");
    for file in [CatalogFile::Models, CatalogFile::Palettes] {
        let value = std::env::var(file.env_var()).ok();
        println!(
            "  {:<13} = {}",
            file.env_var(),
            value.as_deref().unwrap_or("(not set)")
        );
    }

    println!("\nCatalog Sources:");
    for file in [CatalogFile::Models, CatalogFile::Palettes] {
        println!("  {:<14} {}", file.file_name(), loader.source_name(file));
    }

    println!("\nEmbedded:");
    for name in AssetLoader::list_embedded() {
        println!("  {name}");
    }

    match Catalog::load(loader) {
        Ok(catalog) => println!(
            "\nCatalog: {} models, {} palettes",
            catalog.profiles().len(),
            catalog.palettes().len()
        ),
        Err(e) => println!("\nCatalog: failed to load ({e})"),
    }
}
