use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use netexplorer::format::{format_label, substation_info, voltage_level_info};
use netexplorer::{load_network, ExplorerOpt, ExplorerOptBuilder, NetworkExplorer, RowKind};
use std::path::PathBuf;

/// Substation and voltage level explorer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered substation tree.
    List(ListArgs),

    /// Print the rows a virtualized list renders for a scroll position.
    Window(WindowArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Network snapshot (JSON array of substations).
    #[arg(required = true)]
    input: PathBuf,

    /// Case-insensitive filter text.
    #[arg(short, long)]
    filter: Option<String>,

    /// Sort, match and display by name instead of id.
    #[arg(long, default_value_t = false)]
    use_name: bool,
}

#[derive(Args)]
struct WindowArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Scroll offset of the list.
    #[arg(long, default_value_t = 0.0)]
    scroll_top: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Height of a voltage level row.
    #[arg(long)]
    item_height: Option<f64>,

    /// Height of a substation header row.
    #[arg(long)]
    header_height: Option<f64>,

    /// Rows rendered beyond each edge of the viewport.
    #[arg(long)]
    overscan: Option<usize>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_level(false)
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(_) => {
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let list = match &cli.command {
        Commands::List(args) => args,
        Commands::Window(args) => &args.list,
    };

    let mut builder = ExplorerOptBuilder::default();
    builder.use_name(list.use_name);
    if let Commands::Window(args) = &cli.command {
        if let Some(item_height) = args.item_height {
            builder.item_height(item_height);
        }
        if let Some(header_height) = args.header_height {
            builder.header_height(header_height);
        }
        if let Some(overscan) = args.overscan {
            builder.overscan(overscan);
        }
    }
    let opt = builder.build()?;

    let network = load_network(&list.input)?;
    let mut explorer = NetworkExplorer::with_network(network, opt);
    if let Some(filter) = &list.filter {
        explorer.set_filter(filter);
    }

    match &cli.command {
        Commands::List(_) => print_tree(&explorer, explorer.opt()),
        Commands::Window(args) => {
            let vm = explorer.view_model();
            let range = vm.visible_range(args.scroll_top, args.height);
            println!(
                "rows {}..{} of {} (total height {})",
                range.start,
                range.end,
                vm.row_count(),
                vm.total_height()
            );
            for row in vm.window(args.scroll_top, args.height) {
                let (indent, sep) = match row.kind {
                    RowKind::Substation => ("", ""),
                    RowKind::VoltageLevel => ("  ", "  "),
                };
                println!(
                    "{:>8} {:>6} {}{}{}{}",
                    row.top, row.height, indent, row.label, sep, row.secondary
                );
            }
        }
    }

    Ok(())
}

fn print_tree(explorer: &NetworkExplorer, opt: &ExplorerOpt) {
    for (s, vls) in explorer.index().iter() {
        println!("{}{}", format_label(s, opt.use_name), substation_info(s));
        for vl in vls {
            println!(
                "  {}  {}",
                format_label(vl, opt.use_name),
                voltage_level_info(vl)
            );
        }
    }
    log::info!(
        "{} substations, {} rows",
        explorer.index().substation_count(),
        explorer.row_count()
    );
}
