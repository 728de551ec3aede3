//! Binary entrypoint for the concierge CLI.
//!
//! The CLI is the stand-in for the chat-command collaborator: it resolves
//! raw arguments to domain identifiers, invokes the engine, and renders the
//! results. Passive outcomes (locked origin, cooldown) print reaction
//! markers instead of error text, as a chat front-end would react.
//!
//! Commands:
//! - `init` - create a starter `concierge.toml` and seed the world document
//! - `status` - print a summary of the current world document
//! - `walk` / `bus` / `destinations` - player movement
//! - `flip` / `flipbus` / `flipmove` / `pausebus` / `checkin` / `teleport` -
//!   game-master operations (role checking is the invoker's responsibility)
//! - `roll` - roll 1 to 3 d6
//!
//! See the library crate docs for module-level details: `concierge::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;

use concierge::config::Config;
use concierge::validation::validate_identifier;
use concierge::world::{
    BusService, CategoryId, LocationId, MoveMode, MoveRequest, MoveResult, ToggleOutcome, UserId,
    WorldEngine, WorldError,
};

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Location and movement engine for text-based role-play worlds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "concierge.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a starter configuration and seed the world document
    Init,
    /// Show a summary of the world document
    Status,
    /// Travel to a near destination. 5 min user cooldown by default
    Walk {
        /// Acting user
        user: String,
        /// Current location (channel) of the user
        origin: String,
        /// Category of the origin location
        category: String,
        /// Where to go; omit to list reachable destinations
        destination: Option<String>,
    },
    /// Travel to a far place. 1 hour user cooldown by default
    Bus {
        user: String,
        origin: String,
        destination: Option<String>,
    },
    /// List reachable destinations without moving
    Destinations {
        origin: String,
        /// Category of the origin (required for walk mode)
        category: Option<String>,
        /// Travel mode: walk or bus
        #[arg(long, default_value = "walk")]
        mode: String,
    },
    /// Hide or reveal a location (game master)
    Flip { location: String },
    /// Remove a location from the bus network, or add it (game master)
    Flipbus { location: String },
    /// Lock or unlock player movement from a location (game master)
    Flipmove { location: String },
    /// Temporarily disable the bus, or re-enable it (game master)
    Pausebus,
    /// Create a room for a player (game master)
    Checkin { user: String },
    /// Forcefully move a player (game master)
    Teleport {
        user: String,
        origin: String,
        destination: String,
        /// Travel mode whose cooldown is stamped: walk or bus
        #[arg(long, default_value = "walk")]
        via: String,
    },
    /// Roll from 1 to 3 d6
    Roll { amount: u8 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match &cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                println!("{} already exists, leaving it untouched.", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            let config = Config::load(&cli.config).await?;
            // Opening the engine seeds the starter world on first run.
            WorldEngine::open(&config)?;
            println!(
                "Created {} and seeded the world document at {}",
                cli.config, config.world.data_file
            );
        }
        Commands::Status => {
            let config = load_config(pre_config, &cli.config).await?;
            let engine = WorldEngine::open(&config)?;
            show_status(&config, &engine);
        }
        Commands::Walk {
            user,
            origin,
            category,
            destination,
        } => {
            require_valid(&user)?;
            require_valid(&origin)?;
            require_valid(&category)?;
            if let Some(dest) = &destination {
                require_valid(dest)?;
            }
            let config = load_config(pre_config, &cli.config).await?;
            let engine = WorldEngine::open(&config)?;
            let mut request = MoveRequest::walk(
                UserId::new(user.as_str()),
                LocationId::new(origin.as_str()),
                CategoryId::new(category.as_str()),
            );
            if let Some(dest) = destination {
                request = request.to(LocationId::new(dest));
            }
            report_move(&user, MoveMode::Walk, engine.move_user(&request))?;
        }
        Commands::Bus {
            user,
            origin,
            destination,
        } => {
            require_valid(&user)?;
            require_valid(&origin)?;
            if let Some(dest) = &destination {
                require_valid(dest)?;
            }
            let config = load_config(pre_config, &cli.config).await?;
            let engine = WorldEngine::open(&config)?;
            let mut request =
                MoveRequest::bus(UserId::new(user.as_str()), LocationId::new(origin.as_str()));
            if let Some(dest) = destination {
                request = request.to(LocationId::new(dest));
            }
            report_move(&user, MoveMode::Bus, engine.move_user(&request))?;
        }
        Commands::Destinations {
            origin,
            category,
            mode,
        } => {
            let mode: MoveMode = mode.parse().map_err(anyhow::Error::msg)?;
            require_valid(&origin)?;
            if let Some(cat) = &category {
                require_valid(cat)?;
            }
            let config = load_config(pre_config, &cli.config).await?;
            let engine = WorldEngine::open(&config)?;
            let origin = LocationId::new(origin.as_str());
            let category = category.as_deref().map(CategoryId::from);
            match engine.list_destinations(&origin, category.as_ref(), mode) {
                Ok(listing) => print_destinations(mode, &listing),
                Err(err) => report_failure(origin.as_str(), err)?,
            }
        }
        Commands::Flip { location } => {
            require_valid(&location)?;
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.toggle_forbidden(&LocationId::new(location.as_str()))? {
                ToggleOutcome::Added => println!("Location hidden"),
                ToggleOutcome::Removed => println!("Location revealed"),
            }
        }
        Commands::Flipbus { location } => {
            require_valid(&location)?;
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.toggle_bus_destination(&LocationId::new(location.as_str()))? {
                ToggleOutcome::Added => println!("{location} added to bus network"),
                ToggleOutcome::Removed => println!("{location} removed from bus network"),
            }
        }
        Commands::Flipmove { location } => {
            require_valid(&location)?;
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.toggle_locked(&LocationId::new(location.as_str()))? {
                ToggleOutcome::Added => {
                    println!("Location closed, it is no longer possible to leave it")
                }
                ToggleOutcome::Removed => {
                    println!("Location opened, it is now possible to move from it")
                }
            }
        }
        Commands::Pausebus => {
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.pause_or_resume_bus()? {
                BusService::Disabled => println!("Bus disabled"),
                BusService::Enabled => println!("Bus enabled"),
            }
        }
        Commands::Checkin { user } => {
            require_valid(&user)?;
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.assign_room(&UserId::new(user.as_str())) {
                Ok(room) => println!("{user}, your room is now ready: {room}"),
                Err(err) => report_failure(&user, err)?,
            }
        }
        Commands::Teleport {
            user,
            origin,
            destination,
            via,
        } => {
            let via: MoveMode = via.parse().map_err(anyhow::Error::msg)?;
            require_valid(&user)?;
            require_valid(&origin)?;
            require_valid(&destination)?;
            let engine = open_engine(pre_config, &cli.config).await?;
            match engine.force_move(
                &UserId::new(user.as_str()),
                via,
                &LocationId::new(origin.as_str()),
                &LocationId::new(destination.as_str()),
            ) {
                Ok(receipt) => println!("{} moved to {}", user, receipt.destination),
                Err(err) => report_failure(&user, err)?,
            }
        }
        Commands::Roll { amount } => {
            if !(1..=3).contains(&amount) {
                println!("Roll between 1 and 3 dice.");
                return Ok(());
            }
            let mut rng = rand::thread_rng();
            let results: Vec<String> = (0..amount)
                .map(|_| rng.gen_range(1..=6u8).to_string())
                .collect();
            println!("Results: {}", results.join(" "));
        }
    }

    Ok(())
}

async fn load_config(pre_config: Option<Config>, path: &str) -> Result<Config> {
    match pre_config {
        Some(config) => Ok(config),
        None => Config::load(path).await,
    }
}

async fn open_engine(pre_config: Option<Config>, path: &str) -> Result<WorldEngine> {
    let config = load_config(pre_config, path).await?;
    Ok(WorldEngine::open(&config)?)
}

fn require_valid(name: &str) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| anyhow::anyhow!("invalid identifier {:?}: {}", name, e))
}

/// Render a movement outcome the way a chat front-end would.
fn report_move(user: &str, mode: MoveMode, result: Result<MoveResult, WorldError>) -> Result<()> {
    match result {
        Ok(MoveResult::Moved(receipt)) => match mode {
            MoveMode::Walk => println!("{} moved to {}", user, receipt.destination),
            MoveMode::Bus => println!("{} took a ride to {}", user, receipt.destination),
        },
        Ok(MoveResult::Destinations(listing)) => print_destinations(mode, &listing),
        Err(err) => report_failure(user, err)?,
    }
    Ok(())
}

fn print_destinations(mode: MoveMode, listing: &[LocationId]) {
    if listing.is_empty() {
        match mode {
            MoveMode::Walk => {
                println!("There is currently no destination you can reach by foot")
            }
            MoveMode::Bus => println!("Long-distance travel is disabled at the moment."),
        }
        return;
    }
    let names: Vec<&str> = listing.iter().map(|l| l.as_str()).collect();
    match mode {
        MoveMode::Walk => println!("Where to?\n{}", names.join("\n")),
        MoveMode::Bus => println!("List of far destinations:\n{}", names.join("\n")),
    }
}

/// Routine failures become the collaborator's presentation: passive marker
/// reactions for lock/cooldown, short text for the rest. Infrastructure
/// failures propagate as real errors.
fn report_failure(user: &str, err: WorldError) -> Result<()> {
    match err {
        WorldError::LocationLocked => println!("🔒"),
        WorldError::OnCooldown { .. } => println!("🕒"),
        WorldError::InvalidDestination(_) => println!("❌"),
        WorldError::InvalidCategory(_) => println!("You can't move from here"),
        WorldError::NoRoomAssigned(_) => println!("You don't have a bedroom, {user}"),
        WorldError::AlreadyOwned(_) => println!("{user} already owns a room"),
        other => return Err(other.into()),
    }
    Ok(())
}

fn show_status(config: &Config, engine: &WorldEngine) {
    let doc = engine.snapshot();
    let bus_state = if doc.bus_destinations.is_empty() && !doc.bus_state.is_empty() {
        "paused"
    } else {
        "live"
    };
    println!("World: {}", config.world.name);
    println!("Document: {}", config.world.data_file);
    println!("Adjacency rows: {}", doc.available_destinations.len());
    println!("Hidden locations: {}", doc.forbidden_locations.len());
    println!("Locked locations: {}", doc.locked_locations.len());
    println!(
        "Bus network: {} stops ({})",
        doc.bus_destinations.len(),
        bus_state
    );
    println!("Rooms assigned: {}", doc.room_owners.len());
    println!(
        "Cooldown entries: {} walk, {} bus",
        doc.walk_cooldown.len(),
        doc.bus_cooldown.len()
    );
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Config sets the base level; CLI verbosity overrides it upward
    let mut level = config
        .as_ref()
        .and_then(|c| c.logging.level.parse().ok())
        .unwrap_or(log::LevelFilter::Info);
    level = match verbosity {
        0 => level,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let sink = std::sync::Arc::new(std::sync::Mutex::new(f));
            // On a TTY mirror entries to the console as well
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = sink.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
