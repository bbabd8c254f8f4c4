//! tsc-export CLI - export scene documents to spatial-audio scene files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use tsc_export::export::{ExportStats, Exporter};
use tsc_export::prelude::{classify, ExportConfig, Scene, SceneGraph};

/// Verbosity levels selectable from the command line
const LOG_QUIET: &str = "warn";
const LOG_INFO: &str = "info";
const LOG_DEBUG: &str = "debug";
const LOG_TRACE: &str = "trace";

struct Options {
    level: &'static str,
    config: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    triangulate: bool,
    no_modifiers: bool,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("tsc-export");

    let (opts, filtered_args) = match parse_args(&args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => return,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if filtered_args.is_empty() {
        print_usage(prog);
        return;
    }

    init_logging(opts.level);

    if let Err(e) = run(&filtered_args, &opts, prog) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Split global flags from positional arguments. `None` after `--version`.
fn parse_args(args: &[String]) -> Result<Option<(Options, Vec<&str>)>> {
    let mut opts = Options {
        level: LOG_INFO,
        config: None,
        out_dir: None,
        triangulate: false,
        no_modifiers: false,
    };
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => opts.level = LOG_DEBUG,
            "-vv" | "--trace" => opts.level = LOG_TRACE,
            "-q" | "--quiet" => opts.level = LOG_QUIET,
            "--triangulate" => opts.triangulate = true,
            "--no-modifiers" => opts.no_modifiers = true,
            flag @ ("--config" | "-c") => opts.config = Some(option_value(iter.next(), flag)?),
            flag @ ("--out" | "-o") => opts.out_dir = Some(option_value(iter.next(), flag)?),
            "--version" | "-V" => {
                println!(
                    "tsc-export {} (built {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("TSC_EXPORT_BUILD_DATE")
                );
                return Ok(None);
            }
            _ => filtered_args.push(arg),
        }
    }
    Ok(Some((opts, filtered_args)))
}

fn option_value(value: Option<&String>, flag: &str) -> Result<PathBuf> {
    match value {
        Some(v) if !v.starts_with('-') => Ok(PathBuf::from(v)),
        _ => bail!("{} needs a value", flag),
    }
}

fn run(args: &[&str], opts: &Options, prog: &str) -> Result<()> {
    let command = args[0];
    if matches!(command, "help" | "h" | "-h" | "--help") {
        print_usage(prog);
        return Ok(());
    }

    let Some(scene_path) = args.get(1) else {
        eprintln!("Error: missing scene argument");
        eprintln!("Usage: {} {} <scene.json>", prog, command);
        std::process::exit(1);
    };

    let exporter = Exporter::new(load_config(opts)?);
    let scene = Scene::open(scene_path).with_context(|| format!("Failed to open {}", scene_path))?;
    let mut stats = ExportStats::default();

    match command {
        "tsc" | "t" => cmd_tsc(&exporter, &scene, &mut stats)?,
        "raw" | "r" => cmd_raw(&exporter, &scene, &mut stats)?,
        "tracks" | "p" => {
            cmd_raw(&exporter, &scene, &mut stats)?;
            cmd_tracks(&exporter, &scene, &mut stats)?;
        }
        "selection" | "sel" => {
            let path = exporter.export_selection(&scene, args.get(2).map(Path::new), &mut stats)?;
            println!("{}", path.display());
        }
        "pose" => {
            let Some(object) = args.get(2) else {
                bail!("Usage: {} pose <scene.json> <object> [out.txt|-]", prog);
            };
            match args.get(3) {
                Some(&"-") => print!("{}", exporter.pose(&scene, object)?),
                target => {
                    let path = exporter.export_pose(&scene, object, target.map(Path::new))?;
                    println!("{}", path.display());
                }
            }
        }
        "info" | "i" => cmd_info(&scene)?,
        "all" | "a" => {
            cmd_tsc(&exporter, &scene, &mut stats)?;
            cmd_raw(&exporter, &scene, &mut stats)?;
            cmd_tracks(&exporter, &scene, &mut stats)?;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage(prog);
            std::process::exit(1);
        }
    }

    tracing::debug!(?stats, "done");
    Ok(())
}

fn load_config(opts: &Options) -> Result<ExportConfig> {
    let mut config = match &opts.config {
        Some(path) => ExportConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExportConfig::load(),
    };
    if opts.triangulate {
        config.triangulate = true;
    }
    if opts.no_modifiers {
        config.apply_modifiers = false;
    }
    if opts.out_dir.is_some() {
        config.output_dir = opts.out_dir.clone();
    }
    Ok(config)
}

fn print_usage(prog: &str) {
    println!("tsc-export - Export scene documents for spatial-audio rendering");
    println!();
    println!("Usage: {} [options] <command> <scene.json> [args]", prog);
    println!();
    println!("Commands:");
    println!("  t, tsc        Write <base>_export.tsc (face groups and sources)");
    println!("  r, raw        Write <base>_<object>.raw for every mesh");
    println!("  p, tracks     Write raw meshes plus <base>_<object>.csv for every curve");
    println!("  sel, selection <scene.json> [out.raw]");
    println!("                Write faces of the selected objects into one raw file");
    println!("  pose <scene.json> <object> [out.txt|-]");
    println!("                Write position/orientation snippet of one object");
    println!("  i, info       List objects and how they export");
    println!("  a, all        tsc + raw + tracks");
    println!("  h, help       Show this help");
    println!();
    println!("Options:");
    println!("  -c, --config <file>  Export settings (JSON)");
    println!("  -o, --out <dir>      Output directory");
    println!("  --triangulate        Split quads in per-object raw files");
    println!("  --no-modifiers       Export meshes without evaluating modifiers");
    println!("  -v, --verbose        Debug output");
    println!("  -vv, --trace         Trace output (very verbose)");
    println!("  -q, --quiet          Warnings and errors only");
    println!("  -V, --version        Show version");
}

fn cmd_tsc(exporter: &Exporter, scene: &Scene, stats: &mut ExportStats) -> Result<()> {
    let path = exporter.export_scene(scene, stats)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_raw(exporter: &Exporter, scene: &Scene, stats: &mut ExportStats) -> Result<()> {
    for path in exporter.export_meshes(scene, stats)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_tracks(exporter: &Exporter, scene: &Scene, stats: &mut ExportStats) -> Result<()> {
    for path in exporter.export_tracks(scene, stats)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_info(scene: &Scene) -> Result<()> {
    println!("Scene: {}", scene.name());
    println!();
    for object in scene.objects() {
        let roles = classify(object)?;
        let tags: Vec<&str> = roles.iter().map(|r| r.tag()).collect();
        let detail = match (object.mesh(), object.spline_points().len()) {
            (Some(mesh), _) => format!("{} vertices, {} faces", mesh.num_vertices(), mesh.num_faces()),
            (None, n) if n > 0 => format!("{} control points", n),
            _ => String::new(),
        };
        let animated = if object.animation().is_some_and(|a| !a.is_empty()) { " animated" } else { "" };
        println!("  {:<24} {:<6} [{}] {}{}", object.name(), object.kind().to_string(), tags.join(", "), detail, animated);
    }
    println!();
    println!("Total objects: {}", scene.objects.len());
    Ok(())
}
