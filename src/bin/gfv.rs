use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gdp_fertility_viz::config::{
    self, DATA_END_YEAR, DATA_START_YEAR, Indicators, ProviderConfig, SERIES_END_YEAR,
    SERIES_START_YEAR, ServerConfig,
};
use gdp_fertility_viz::server::{self, AppState};
use gdp_fertility_viz::{Client, Error, combine, directory, indicators, storage, validate};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "gfv",
    version,
    about = "Serve & export World Bank GDP per capita and fertility rate data"
)]
struct Cli {
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ProviderArgs {
    /// World Bank API base URL.
    #[arg(long, global = true, env = "WB_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,
    /// Total request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// GDP indicator code.
    #[arg(long, global = true, env = "GFV_GDP_INDICATOR", default_value = config::GDP_INDICATOR)]
    gdp_indicator: String,
    /// Fertility indicator code.
    #[arg(long, global = true, env = "GFV_FERTILITY_INDICATOR", default_value = config::FERTILITY_INDICATOR)]
    fertility_indicator: String,
}

impl ProviderArgs {
    fn client(&self) -> Result<Client> {
        let cfg = ProviderConfig {
            base_url: self.base_url.clone(),
            timeout: std::time::Duration::from_secs(self.timeout),
            ..ProviderConfig::default()
        };
        Client::new(&cfg)
    }

    fn indicators(&self) -> Indicators {
        Indicators {
            gdp: self.gdp_indicator.clone(),
            fertility: self.fertility_indicator.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// List available (non-aggregate) countries.
    Countries(CountriesArgs),
    /// Fetch the combined GDP + fertility dataset.
    Data(DataArgs),
    /// Fetch a single indicator series.
    Indicator(IndicatorArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "GFV_HOST", default_value = config::DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "GFV_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Print JSON instead of one line per country.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Country codes separated by comma (e.g., usa,gbr). Defaults to 30 major economies.
    #[arg(short, long)]
    countries: Option<String>,
    #[arg(long, default_value_t = DATA_START_YEAR)]
    start_year: i32,
    #[arg(long, default_value_t = DATA_END_YEAR)]
    end_year: i32,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IndicatorKind {
    Gdp,
    Fertility,
}

#[derive(Args, Debug)]
struct IndicatorArgs {
    #[arg(value_enum)]
    kind: IndicatorKind,
    /// Country codes separated by comma.
    #[arg(short, long)]
    countries: String,
    #[arg(long, default_value_t = SERIES_START_YEAR)]
    start_year: i32,
    #[arg(long, default_value_t = SERIES_END_YEAR)]
    end_year: i32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(&cli.provider, args),
        Command::Countries(args) => cmd_countries(&cli.provider, args),
        Command::Data(args) => cmd_data(&cli.provider, args),
        Command::Indicator(args) => cmd_indicator(&cli.provider, args),
    }
}

fn cmd_serve(provider: &ProviderArgs, args: ServeArgs) -> Result<()> {
    // Built outside the runtime: the blocking client must not be dropped on an async worker.
    let client = Arc::new(provider.client()?);
    let state = AppState::new(client.clone(), provider.indicators());
    let cfg = ServerConfig {
        host: args.host,
        port: args.port,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(&cfg, state))?;
    drop(runtime);
    drop(client);
    Ok(())
}

fn cmd_countries(provider: &ProviderArgs, args: CountriesArgs) -> Result<()> {
    let client = provider.client()?;
    let countries = directory::list_countries(&client)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&countries)?);
    } else {
        for c in &countries {
            println!("{}\t{}\t{}", c.code, c.name, c.region);
        }
    }
    Ok(())
}

fn resolve_countries(client: &Client, raw: Option<&str>) -> Result<Vec<String>> {
    let requested = match raw {
        Some(s) if !s.trim().is_empty() => validate::parse_country_list(s),
        _ => config::default_countries(),
    };
    let valid = validate::validate_country_codes(client, &requested)?;
    if valid.is_empty() {
        return Err(Error::InvalidCountries.into());
    }
    Ok(valid)
}

fn cmd_data(provider: &ProviderArgs, args: DataArgs) -> Result<()> {
    validate::check_year_range(args.start_year, args.end_year)?;
    let client = provider.client()?;
    let countries = resolve_countries(&client, args.countries.as_deref())?;
    let dataset = combine::fetch_combined(
        &client,
        &provider.indicators(),
        &countries,
        args.start_year,
        args.end_year,
    )?;

    match args.out.as_ref() {
        Some(path) => {
            let fmt = match args.format {
                Some(OutFormat::Csv) => "csv",
                Some(OutFormat::Json) => "json",
                None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
            }
            .to_ascii_lowercase();
            match fmt.as_str() {
                "csv" => storage::save_csv(&dataset, path)?,
                "json" => storage::save_json(&dataset, path)?,
                other => anyhow::bail!("unsupported format: {}", other),
            }
            eprintln!(
                "Saved {} countries to {}",
                dataset.countries.len(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&dataset)?),
    }
    Ok(())
}

fn cmd_indicator(provider: &ProviderArgs, args: IndicatorArgs) -> Result<()> {
    let client = provider.client()?;
    let countries = resolve_countries(&client, Some(&args.countries))?;
    let ind = provider.indicators();
    let indicator_id = match args.kind {
        IndicatorKind::Gdp => ind.gdp,
        IndicatorKind::Fertility => ind.fertility,
    };
    let series = indicators::fetch_indicator(
        &client,
        &indicator_id,
        &countries,
        args.start_year,
        args.end_year,
    )?;
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
