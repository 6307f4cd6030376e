//! bamtex CLI - Inspect and edit BAM texture records.
//!
//! Works on a single raw record (the bytes of one `Texture` object, as
//! cut out of a BAM file's object table).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bamtex::prelude::*;
use bamtex::texture::fields::FIELD_GROUPS;
use bamtex::texture::presence::absent_fields;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Version assumed when `--bam` is not given.
const DEFAULT_BAM_VERSION: BamVersion = BamVersion::new(6, 45);

/// Options shared by all commands.
struct Options {
    bam: BamVersion,
    to: Option<BamVersion>,
    config: FileConfig,
    out: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut positional: Vec<&str> = Vec::new();
    let mut opts = Options {
        bam: DEFAULT_BAM_VERSION,
        to: None,
        config: FileConfig::from_env(),
        out: None,
    };

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        let result = match arg.as_str() {
            "-v" | "--verbose" => {
                level = "debug";
                Ok(())
            }
            "-vv" | "--trace" => {
                level = "trace";
                Ok(())
            }
            "-q" | "--quiet" => {
                level = "error";
                Ok(())
            }
            "-d" | "--double" => {
                opts.config = opts.config.with_float_width(FloatWidth::F64);
                Ok(())
            }
            "-b" | "--bam" => parse_version_arg(iter.next(), "--bam").map(|v| opts.bam = v),
            "-t" | "--to" => parse_version_arg(iter.next(), "--to").map(|v| opts.to = Some(v)),
            "-o" | "--out" => match iter.next() {
                Some(p) => {
                    opts.out = Some(PathBuf::from(p));
                    Ok(())
                }
                None => Err(anyhow::anyhow!("--out needs a path")),
            },
            "-h" | "--help" => {
                print_help();
                return;
            }
            _ => {
                positional.push(arg);
                Ok(())
            }
        };
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }

    init_logging(level);

    if positional.is_empty() {
        print_help();
        return;
    }

    let result = match (positional[0], &positional[1..]) {
        ("info" | "i", [path]) => cmd_info(Path::new(path), &opts),
        ("json" | "j", [path]) => cmd_json(Path::new(path), &opts),
        ("convert" | "c", [input, output]) => cmd_convert(Path::new(input), Path::new(output), &opts),
        ("set" | "s", [path, field, value]) => cmd_set(Path::new(path), field, value, &opts),
        ("fields" | "f", []) => cmd_fields(&opts),
        (cmd, _) => {
            eprintln!("Error: bad arguments for '{}'", cmd);
            eprintln!("Run 'bamtex --help' for usage.");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bamtex={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_version_arg(value: Option<&String>, flag: &str) -> anyhow::Result<BamVersion> {
    let value = value.with_context(|| format!("{} needs a version like 6.45", flag))?;
    Ok(value.parse()?)
}

fn print_help() {
    println!("bamtex - BAM texture record toolkit (built {})", env!("BAMTEX_BUILD_DATE"));
    println!();
    println!("USAGE:");
    println!("    bamtex [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    info, i <record>                  Show all fields");
    println!("    json, j <record>                  Dump the record as JSON");
    println!("    convert, c <in> <out>             Re-encode for --to version");
    println!("    set, s <record> <field> <value>   Edit one field in place (or into --out)");
    println!("    fields, f                         List editable fields for --bam version");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bam <M.m>      Version the record is laid out for (default {})", DEFAULT_BAM_VERSION);
    println!("    -t, --to <M.m>       Target version for convert (default: same as --bam)");
    println!("    -o, --out <path>     Output path for set");
    println!("    -d, --double         Std-floats are 64-bit (also {}=1)", bamtex::core::STDFLOAT_DOUBLE_ENV);
    println!("    -v, --verbose        Debug logging");
    println!("    -vv, --trace         Trace logging");
    println!("    -q, --quiet          Errors only");
    println!("    -h, --help           Show this help");
}

fn load(path: &Path, opts: &Options) -> anyhow::Result<TextureRecord> {
    info!("Reading {} as BAM {}", path.display(), opts.bam);
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;

    let factory = ObjectFactory::global().read();
    let mut di = DatagramIterator::with_config(&bytes, opts.config);
    let obj = factory
        .make(TEXTURE_TYPE_NAME, &mut di, opts.bam)
        .with_context(|| format!("cannot decode {}", path.display()))?;

    match obj.downcast_ref::<TextureRecord>() {
        Some(tex) => Ok(tex.clone()),
        None => bail!("{} is not a texture record", path.display()),
    }
}

/// Encode the whole record first, then replace `path` in one rename.
fn save(path: &Path, tex: &TextureRecord, version: BamVersion, config: FileConfig) -> anyhow::Result<()> {
    let mut dg = Datagram::with_config(config);
    tex.encode(version, &mut dg)?;
    let bytes = dg.into_inner()?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &bytes).with_context(|| format!("cannot write {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("cannot replace {}", path.display()));
    }
    info!("Wrote {} ({} bytes, BAM {})", path.display(), bytes.len(), version);
    Ok(())
}

fn cmd_info(path: &Path, opts: &Options) -> anyhow::Result<()> {
    let tex = load(path, opts)?;

    println!("Texture: {}", tex.display_name());
    println!("BAM version: {}", opts.bam);
    println!();

    for group in FIELD_GROUPS {
        println!("[{}]", group);
        for desc in bamtex::texture::fields::group_fields(group) {
            let value = tex.field(desc.name)?;
            if desc.editable_in(opts.bam) {
                println!("  {:<28} {}", desc.label, value);
            } else {
                println!("  {:<28} n/a (BAM {}+)", desc.label, desc.since().unwrap_or(opts.bam));
            }
        }
        println!();
    }

    println!("Trailing payload: {} bytes", tex.payload.len());
    Ok(())
}

fn cmd_json(path: &Path, opts: &Options) -> anyhow::Result<()> {
    let tex = load(path, opts)?;
    println!("{}", serde_json::to_string_pretty(&tex)?);
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path, opts: &Options) -> anyhow::Result<()> {
    let tex = load(input, opts)?;
    let target = opts.to.unwrap_or(opts.bam);

    for field in absent_fields(target).filter(|f| present(*f, opts.bam)) {
        debug!("Dropping {} (not stored before BAM {})", field.name(), field.since());
    }

    save(output, &tex, target, opts.config)
}

fn cmd_set(path: &Path, field: &str, value: &str, opts: &Options) -> anyhow::Result<()> {
    let mut tex = load(path, opts)?;

    let desc = descriptor(field).with_context(|| format!("unknown field '{}'", field))?;
    if !desc.editable_in(opts.bam) {
        bail!(
            "{} is not stored in BAM {} (needs {})",
            field,
            opts.bam,
            desc.since().unwrap_or(opts.bam)
        );
    }

    let before = tex.field(field)?;
    tex.set_field_text(field, value)?;
    info!("{}: {} -> {}", field, before, tex.field(field)?);

    let out = opts.out.as_deref().unwrap_or(path);
    save(out, &tex, opts.bam, opts.config)
}

fn cmd_fields(opts: &Options) -> anyhow::Result<()> {
    println!("Editable fields for BAM {}:", opts.bam);
    for desc in FIELD_DESCRIPTORS {
        let mark = if desc.editable_in(opts.bam) { " " } else { "x" };
        println!("  [{}] {:<28} {:<20} {:?}", mark, desc.name, desc.group, desc.kind);
    }
    Ok(())
}
