use std::path::PathBuf;
use std::process::ExitCode;

use typecase::config::Config;
use typecase::font::{FontError, FontSource, open_provider};
use typecase::logging;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--print-config") {
        return match toml::to_string_pretty(&Config::default()) {
            Ok(s) => {
                print!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("typecase {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = Config::load();
    logging::init(config.log.level_filter());

    let result = match args[0].as_str() {
        "measure" => MeasureArgs::parse(&args[1..]).and_then(|m| measure(&config, &m)),
        other => Err(format!("unknown command '{other}' (try --help)")),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("typecase {}", env!("CARGO_PKG_VERSION"));
    println!("Glyph-atlas text typesetting\n");
    println!("USAGE:");
    println!("    typecase [OPTIONS]");
    println!("    typecase measure [--font <path>] [--size <px>] <text>...\n");
    println!("COMMANDS:");
    println!("    measure           Print the unexpanded pixel width of each text");
    println!("                      and the font's line height\n");
    println!("OPTIONS:");
    println!("    --print-config    Print the default configuration to stdout");
    println!("    --version, -V     Print version information");
    println!("    --help, -h        Print this help message");
}

/// Arguments of the `measure` command.
#[derive(Debug, Default, PartialEq)]
struct MeasureArgs {
    font: Option<PathBuf>,
    size: Option<u32>,
    texts: Vec<String>,
}

impl MeasureArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut out = Self::default();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--font" => {
                    let path = it.next().ok_or("--font needs a path")?;
                    out.font = Some(PathBuf::from(path));
                }
                "--size" => {
                    let px = it.next().ok_or("--size needs a pixel size")?;
                    let px = px.parse().map_err(|_| format!("invalid --size '{px}'"))?;
                    out.size = Some(px);
                }
                _ => out.texts.push(arg.clone()),
            }
        }
        if out.texts.is_empty() {
            return Err("measure needs at least one text".to_owned());
        }
        Ok(out)
    }
}

/// Measure with a host-memory atlas; no GPU is touched.
fn measure(config: &Config, args: &MeasureArgs) -> Result<(), String> {
    let mut options = config.font_options();
    if let Some(px) = args.size {
        options.pixel_size = px;
    }
    let path = args
        .font
        .clone()
        .or_else(|| config.font.path.clone())
        .ok_or("no font: pass --font <path> or set [font] path in the config")?;

    let provider = open_provider(&FontSource::Path(path), &options).map_err(|e| e.to_string())?;
    let mut font = typecase_core::Font::headless(provider, &options)
        .map_err(|e| FontError::from(e).to_string())?;

    for text in &args.texts {
        println!("{}\t{text}", typecase_core::line_length(&mut font, text));
    }
    println!("line height: {}px", font.height());
    Ok(())
}
