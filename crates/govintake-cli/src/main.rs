mod display;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use govintake_core::table::DEFAULT_PAGE_SIZE;
use govintake_core::{
    Column, Process, RawRequests, SortDirection, SortSpec, TableQuery, Viewer,
    decode_intakes, decode_lifecycle_costs, decode_trb_requests, rollup, run_query,
};
use govintake_sync::SyncClient;

#[derive(Parser)]
#[command(name = "govintake", version, about = "Governance intake and TRB request lists")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge and list requests from exported JSON files.
    List {
        /// JSON array of governance intakes.
        #[arg(long)]
        governance: Option<PathBuf>,
        /// JSON array of TRB requests.
        #[arg(long)]
        trb: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Fetch requests from the API, then merge and list them.
    Fetch {
        #[arg(long, env = "GOVINTAKE_API_URL")]
        api_url: String,
        #[arg(long, env = "GOVINTAKE_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print lifecycle cost totals for each business case solution.
    Costs {
        /// JSON array of solutions with their cost lines.
        file: PathBuf,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Show admin-facing governance statuses.
    #[arg(long)]
    admin: bool,
    /// Column to sort by: name, process, status, submitted, systems, next-meeting, lcid.
    #[arg(long, default_value_t = Column::SubmissionDate)]
    sort: Column,
    #[arg(long, conflicts_with = "desc")]
    asc: bool,
    /// Sort descending (the default).
    #[arg(long)]
    desc: bool,
    #[arg(long, value_enum)]
    process: Option<ProcessArg>,
    /// Only show rows containing this text (case-insensitive).
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    /// Print the page as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Fail on status codes this build does not know instead of listing them last.
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProcessArg {
    Itgov,
    Trb,
}

impl ViewArgs {
    fn viewer(&self) -> Viewer {
        if self.admin {
            Viewer::Admin
        } else {
            Viewer::Requester
        }
    }

    fn query(&self) -> TableQuery {
        TableQuery {
            sort: SortSpec {
                column: self.sort,
                direction: if self.asc && !self.desc {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            },
            process: self.process.map(|p| match p {
                ProcessArg::Itgov => Process::ItGovernance,
                ProcessArg::Trb => Process::Trb,
            }),
            filter: self.filter.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("govintake v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::List {
            governance,
            trb,
            view,
        } => {
            let raw = load_files(governance.as_deref(), trb.as_deref(), view.viewer())?;
            show(&raw, &view)
        }
        Command::Fetch {
            api_url,
            token,
            view,
        } => {
            let client = SyncClient::new(api_url, token);
            let raw = client
                .fetch_requests(view.viewer())
                .await
                .context("fetching request lists")?;
            show(&raw, &view)
        }
        Command::Costs { file } => {
            let json = read(&file)?;
            let solutions = decode_lifecycle_costs(&json)
                .with_context(|| format!("decoding {}", file.display()))?;
            for solution in &solutions {
                display::print_cost_rollup(&rollup(solution)?);
            }
            Ok(())
        }
    }
}

/// A missing file stands for a list that has not been loaded: it merges as empty.
fn load_files(
    governance: Option<&Path>,
    trb: Option<&Path>,
    viewer: Viewer,
) -> anyhow::Result<RawRequests> {
    let mut raw = RawRequests::default();
    if let Some(path) = governance {
        raw.governance = decode_intakes(&read(path)?, viewer)
            .with_context(|| format!("decoding {}", path.display()))?;
    }
    if let Some(path) = trb {
        raw.trb = decode_trb_requests(&read(path)?)
            .with_context(|| format!("decoding {}", path.display()))?;
    }
    Ok(raw)
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn show(raw: &RawRequests, view: &ViewArgs) -> anyhow::Result<()> {
    if view.strict {
        raw.ensure_recognized()?;
    }
    let merged = raw.merge();
    let page = run_query(&merged, &view.query())?;
    if view.json {
        println!("{}", serde_json::to_string_pretty(&page.rows)?);
    } else {
        display::print_request_page(&page);
    }
    Ok(())
}
