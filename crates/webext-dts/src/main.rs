//! Command-line driver: read schema directories, write one `.d.ts` file.

mod fixes;
mod load;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webext_typegen::{EmitOptions, SchemaTable, emit_declarations, patch};

#[derive(Parser)]
#[command(
    name = "webext-dts",
    version,
    about = "Generate .d.ts declarations from WebExtension API schemas"
)]
struct Args {
    /// Schema directories to read. Fragments naming the same namespace
    /// merge, in file-name order.
    #[arg(required = true)]
    dirs: Vec<PathBuf>,

    /// Output file, or `-` for stdout.
    #[arg(short, long, default_value = "browser.d.ts")]
    out: PathBuf,

    /// Extra namespace alias, as OLD=NEW. Repeatable.
    #[arg(long, value_name = "OLD=NEW")]
    alias: Vec<String>,

    /// Emit closed string sets with the `enum` keyword.
    #[arg(long)]
    enums: bool,

    /// Skip the built-in patch list.
    #[arg(long)]
    raw: bool,

    /// Root object the namespaces attach to.
    #[arg(long, default_value = "browser")]
    root: String,

    /// Increase log detail (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "webext_dts=warn,webext_typegen=warn",
        1 => "webext_dts=info,webext_typegen=info",
        _ => "webext_dts=debug,webext_typegen=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut aliases = fixes::default_aliases();
    for pair in &args.alias {
        let Some((old, new)) = pair.split_once('=') else {
            return Err(format!("invalid alias `{pair}`, expected OLD=NEW").into());
        };
        aliases.insert(old.to_string(), new.to_string());
    }

    let fragments = load::load_directories(&args.dirs)?;
    let mut table = SchemaTable::from_fragments(fragments, aliases);
    patch::mark_unsupported_optional(&mut table);
    if !args.raw {
        patch::apply(&mut table, &fixes::default_fixes());
    }

    let options = EmitOptions {
        root: args.root.clone(),
        enum_keyword: args.enums,
        header: true,
    };
    let output = emit_declarations(&table, &options)?;
    if args.out == Path::new("-") {
        std::io::stdout().write_all(output.as_bytes())?;
    } else {
        std::fs::write(&args.out, &output)?;
    }
    info!(
        path = %args.out.display(),
        namespaces = table.len(),
        "declarations written"
    );
    Ok(())
}
