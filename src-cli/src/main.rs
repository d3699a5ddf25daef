use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use label_engine::capacity::{self, UNSUPPORTED};
use label_engine::{ErrorCorrection, FontSet, LabelRequest, Layout, Zone, render};

use qr_labeler_lib::config::AppConfig;
use qr_labeler_lib::config::defaults::settings_help;
use qr_labeler_lib::services::batch::{self, BatchJob};
use qr_labeler_lib::services::output::DEFAULT_OUTPUT_NAME;

#[derive(Parser)]
#[command(
    name = "qr-labeler",
    about = "Printable QR code labels",
    version,
    after_long_help = settings_help()
)]
struct Cli {
    /// Caption font (TTF/OTF); overrides QR_LABEL_FONT
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Directory for labels without an explicit --output; overrides QR_LABEL_OUTPUT_DIR
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Square label of a fixed pixel size
    Square {
        #[arg(short, long)]
        url: String,

        /// Canvas side in pixels (100-2000)
        #[arg(long, default_value = "300")]
        size: u32,

        /// Output PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        qr: QrArgs,
    },

    /// Rectangular label sized in millimetres
    Rect {
        #[arg(short, long)]
        url: String,

        #[arg(long)]
        width_mm: f64,

        #[arg(long)]
        height_mm: f64,

        /// Print resolution; defaults to QR_LABEL_DPI
        #[arg(long)]
        dpi: Option<u32>,

        /// Output PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        qr: QrArgs,
    },

    /// QR code placed into a zone of a template image
    Template {
        #[arg(short, long)]
        url: String,

        /// Background template image
        #[arg(short, long)]
        template: PathBuf,

        /// Placement zone as x,y,width,height (whole template if omitted)
        #[arg(long, value_parser = parse_zone)]
        zone: Option<Zone>,

        /// Output PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        qr: QrArgs,
    },

    /// One label per CSV row: base URL + suffix from the first column
    Batch {
        #[arg(long)]
        base_url: String,

        /// Header-less CSV of URL suffixes
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        qr: QrArgs,
    },

    /// Show module count and approximate capacity for a QR version
    Info {
        /// QR version
        #[arg(long, default_value = "1")]
        qr_version: u32,

        #[arg(long, default_value = "m", value_enum)]
        ec: EcArg,

        /// Optional URL to compare against the capacity
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[derive(Args)]
struct QrArgs {
    /// Requested QR version (1-40); larger versions are used if the data does not fit
    #[arg(long)]
    qr_version: Option<u32>,

    /// Error-correction level
    #[arg(long, value_enum)]
    ec: Option<EcArg>,
}

#[derive(Args)]
struct LayoutArgs {
    /// Square canvas side in pixels
    #[arg(long, conflicts_with_all = ["width_mm", "height_mm", "template"])]
    size: Option<u32>,

    #[arg(long, requires = "height_mm")]
    width_mm: Option<f64>,

    #[arg(long, requires = "width_mm")]
    height_mm: Option<f64>,

    #[arg(long)]
    dpi: Option<u32>,

    /// Background template image
    #[arg(long, conflicts_with_all = ["width_mm", "height_mm"])]
    template: Option<PathBuf>,

    /// Placement zone as x,y,width,height
    #[arg(long, value_parser = parse_zone, requires = "template")]
    zone: Option<Zone>,
}

impl LayoutArgs {
    fn to_layout(&self, config: &AppConfig) -> Layout {
        if let Some(template_path) = &self.template {
            return Layout::Template {
                template_path: template_path.clone(),
                zone: self.zone,
            };
        }
        if let (Some(width_mm), Some(height_mm)) = (self.width_mm, self.height_mm) {
            return Layout::Rectangle {
                width_mm,
                height_mm,
                dpi: self.dpi.unwrap_or(config.dpi),
            };
        }
        Layout::Square {
            size_px: self.size.unwrap_or(300),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for ErrorCorrection {
    fn from(arg: EcArg) -> Self {
        match arg {
            EcArg::L => Self::L,
            EcArg::M => Self::M,
            EcArg::Q => Self::Q,
            EcArg::H => Self::H,
        }
    }
}

/// Parse `x,y,width,height`.
fn parse_zone(s: &str) -> Result<Zone, String> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid zone '{s}': {e}"))?;
    match parts[..] {
        [x, y, width, height] if width > 0 && height > 0 => Ok(Zone {
            x,
            y,
            width,
            height,
        }),
        [_, _, _, _] => Err("zone width and height must be positive".into()),
        _ => Err(format!("zone must be x,y,width,height, got '{s}'")),
    }
}

fn build_request(url: String, layout: Layout, qr: &QrArgs, config: &AppConfig) -> LabelRequest {
    LabelRequest::new(url, layout)
        .with_qr_version(qr.qr_version.unwrap_or(config.qr_version))
        .with_error_correction(qr.ec.map_or(config.error_correction, Into::into))
}

fn write_label(request: &LabelRequest, fonts: &FontSet, output: &Path) -> Result<()> {
    let label = render(request, fonts)?;
    label.save_png(output)?;

    if label.qr_version_upgraded() {
        println!(
            "Data did not fit QR version {}; used version {}",
            label.requested_qr_version, label.qr_version
        );
    }
    match label.font_size {
        Some(size) => println!(
            "Saved {} (QR version {}, caption {:?} at {size}px)",
            output.display(),
            label.qr_version,
            label.caption
        ),
        None => println!(
            "Saved {} (QR version {}, no caption: no usable font)",
            output.display(),
            label.qr_version
        ),
    }
    Ok(())
}

fn print_info(version: u32, level: ErrorCorrection, url: Option<&str>) {
    let modules = capacity::module_count(version);
    println!("QR version {version}: {modules} x {modules} modules");

    let max = capacity::max_chars(version, level.as_str());
    if max == UNSUPPORTED {
        println!("Approx. capacity at level {level}: unknown (table covers versions 1-8)");
        return;
    }
    println!("Approx. capacity at level {level}: {max} characters");

    if let Some(url) = url {
        let len = url.chars().count();
        if len as i32 <= max {
            println!("URL length {len} fits");
        } else {
            println!("URL length {len} exceeds the estimate; the encoder will pick a larger version");
        }
    }
}

fn main() -> Result<()> {
    qr_labeler_lib::init_tracing();
    let cli = Cli::parse();

    qr_labeler_lib::load_dotenv();
    let config = AppConfig::load()?;
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| config.output_dir.clone());
    let default_output = || output_dir.join(DEFAULT_OUTPUT_NAME);
    let load_fonts = || {
        let font_path = cli.font.clone().or_else(|| config.font_path.clone());
        FontSet::load(font_path.as_deref())
    };

    match &cli.command {
        Commands::Square {
            url,
            size,
            output,
            qr,
        } => {
            let request = build_request(url.clone(), Layout::Square { size_px: *size }, qr, &config);
            let output = output.clone().unwrap_or_else(default_output);
            write_label(&request, &load_fonts(), &output)?;
        }

        Commands::Rect {
            url,
            width_mm,
            height_mm,
            dpi,
            output,
            qr,
        } => {
            let layout = Layout::Rectangle {
                width_mm: *width_mm,
                height_mm: *height_mm,
                dpi: dpi.unwrap_or(config.dpi),
            };
            let request = build_request(url.clone(), layout, qr, &config);
            let output = output.clone().unwrap_or_else(default_output);
            write_label(&request, &load_fonts(), &output)?;
        }

        Commands::Template {
            url,
            template,
            zone,
            output,
            qr,
        } => {
            let layout = Layout::Template {
                template_path: template.clone(),
                zone: *zone,
            };
            let request = build_request(url.clone(), layout, qr, &config);
            let output = output.clone().unwrap_or_else(default_output);
            write_label(&request, &load_fonts(), &output)?;
        }

        Commands::Batch {
            base_url,
            input,
            layout,
            qr,
        } => {
            let suffixes = batch::read_suffix_file(input)?;
            let job = BatchJob {
                base_url: base_url.clone(),
                layout: layout.to_layout(&config),
                qr_version: qr.qr_version.unwrap_or(config.qr_version),
                error_correction: qr.ec.map_or(config.error_correction, Into::into),
                output_dir: output_dir.clone(),
            };
            let written = batch::run_batch(&job, &suffixes, &load_fonts())?;
            println!("Generated {} labels → {}", written.len(), output_dir.display());
        }

        Commands::Info {
            qr_version,
            ec,
            url,
        } => print_info(*qr_version, (*ec).into(), url.as_deref()),
    }

    Ok(())
}
