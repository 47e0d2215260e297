use clap::{Parser, Subcommand};
use flatsite::{config, generate, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flatsite")]
#[command(about = "Flatten templated pages into a standalone static HTML site")]
#[command(long_about = "\
Flatten templated pages into a standalone static HTML site

Pages reference shared fragments through PHP-style include directives. The
build substitutes each directive with the fragment's content, rewrites
internal links from the source extension to the output extension, and
mirrors asset directories verbatim.

Source structure:

  site/
  ├── config.toml                  # Site config (optional)
  ├── 0_config.php                 # Excluded from page generation
  ├── 1_head.php                   # Include fragment
  ├── 2_nav.php                    # Include fragment
  ├── 9_footer.php                 # Include fragment
  ├── index.php                    # Page → index.html
  ├── about.php                    # Page → about.html
  ├── css/                         # Asset directory → copied verbatim
  └── images/                      # Asset directory → copied verbatim

A directive like <?php require_once '2_nav.php'; ?> is replaced by the
fragment's exact content. Local links such as href=\"about.php\" become
href=\"about.html\"; absolute URLs are left untouched. A directive naming
an unlisted fragment is kept as-is and reported as a warning.

Run 'flatsite gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory containing pages, fragments, and assets
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → flatten pages → copy assets
    Build,
    /// Print the site inventory (pages, includes, assets)
    Scan {
        /// Serialize the manifest as JSON instead of the inventory listing
        #[arg(long)]
        json: bool,
    },
    /// Validate the source directory without writing output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let manifest = scan::scan(&cli.source)?;
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_build_output(&report, &cli.output);
        }
        Command::Scan { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest, &cli.source);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let report = generate::check(&manifest, &cli.source)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
