use clap::Parser;
use fempredict::app::render::CLOSING_REMARKS;
use fempredict::config::cli::{CycleArgs, GenderArgs};
use fempredict::config::Command;
use fempredict::core::{ConfigProvider, SessionStore};
use fempredict::utils::error::ErrorSeverity;
use fempredict::utils::logger;
use fempredict::utils::validation::{parse_date, Validate};
use fempredict::{
    CliConfig, Console, CycleParameters, FileSessionStore,
    OutputFormat, Renderer, Result, Session, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (檔案可省略)
    let mut config = match TomlConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config.display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    let level = config.logging.level.as_deref();
    if config.json_logging() {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        let exit_code = match e.severity() {
            ErrorSeverity::Low => {
                tracing::warn!("⚠️ {}", e);
                eprintln!("⚠️ {}", e.user_friendly_message());
                0
            }
            severity => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    severity
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                match severity {
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::Critical => 3,
                    _ => 1,
                }
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    let store = FileSessionStore::new(config.session_file());
    let renderer = Renderer::from_config(config)?;

    let output = match command {
        Command::Cycle(args) => cycle(args, config, &store, &renderer).await?,
        Command::Gender(args) => gender(args, &store, &renderer).await?,
        Command::Status => {
            let session = Session::load(&store).await?;
            renderer.status(&session.state())?
        }
        Command::Reset => {
            store.clear().await?;
            tracing::info!("🧹 Session cleared: {}", store.path().display());
            "Session cleared.".to_string()
        }
        Command::Interactive => {
            let mut console = Console::from_config(config)?;
            let stdin = std::io::stdin();
            console.run(stdin.lock(), std::io::stdout())?;
            return Ok(());
        }
    };

    println!("{}", output);
    if renderer.format() == OutputFormat::Text {
        println!();
        println!("{}", CLOSING_REMARKS);
    }
    Ok(())
}

async fn cycle(
    args: CycleArgs,
    config: &TomlConfig,
    store: &FileSessionStore,
    renderer: &Renderer,
) -> Result<String> {
    let params = CycleParameters::parse(
        &args.start,
        args.cycle_length.unwrap_or(config.default_cycle_length()),
        args.period_duration.unwrap_or(config.default_period_duration()),
    )?;

    let mut session = Session::load(store).await?;
    let result = session.record_cycle(&params)?;
    session.save(store).await?;
    tracing::info!("💾 Ovulation date saved to {}", store.path().display());

    renderer.cycle(&result)
}

async fn gender(args: GenderArgs, store: &FileSessionStore, renderer: &Renderer) -> Result<String> {
    let intercourse_date = parse_date("intercourse_date", &args.intercourse)?;

    let prediction = Session::load(store).await?.predict(intercourse_date)?;

    renderer.prediction(&prediction)
}
