use clap::Parser;
use dotenvy::dotenv;
use entity_scaffold::{
    AppConfig, EntityModelBuilder, JsonRenderer, MemorySchema, MySqlSchemaSource, Renderer,
    SchemaSource, load_config,
};
use std::{error::Error, fmt::Display, path::PathBuf, process::exit};
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Infer entities and their associations from a MySQL schema and print them as JSON"
)]
struct Cli {
    #[arg(long, help = "JSON config file with `connection`, `generator` and `render` sections")]
    config: Option<PathBuf>,

    #[arg(long, env = "DATABASE_HOST", help = "Database host")]
    host: Option<String>,

    #[arg(long, env = "DATABASE_PORT", help = "Database port")]
    port: Option<u16>,

    #[arg(short = 'u', long, env = "DATABASE_USER", help = "Database user")]
    user: Option<String>,

    #[arg(
        short = 'p',
        long,
        env = "DATABASE_PASSWORD",
        hide_env_values = true,
        help = "Database password"
    )]
    password: Option<String>,

    #[arg(short = 'd', long, env = "DATABASE_NAME", help = "Database (schema) to introspect")]
    database: Option<String>,

    #[arg(long, help = "Read the schema from a JSON snapshot instead of a live database")]
    snapshot: Option<PathBuf>,

    #[arg(long, help = "Keep table-name prefixes in entity names, no modules")]
    no_strip_prefix: bool,

    #[arg(long, help = "Generate one-to-many associations")]
    one_to_many: bool,

    #[arg(long, help = "Generate many-to-one associations")]
    many_to_one: bool,

    #[arg(long, help = "Do not generate many-to-many associations")]
    no_many_to_many: bool,

    #[arg(long, help = "Exit with an error if any part of the schema could not be read")]
    strict: bool,

    #[arg(short = 'v', long, help = "Show debug messages")]
    verbose: bool,
}

impl Cli {
    /// Flags and environment variables take precedence over the config file
    fn merge_into(&self, config: &mut AppConfig) {
        let connection = &mut config.connection;
        if let Some(host) = &self.host {
            connection.host = host.clone();
        }
        if let Some(port) = self.port {
            connection.port = port;
        }
        if let Some(user) = &self.user {
            connection.user = user.clone();
        }
        if let Some(password) = &self.password {
            connection.password = password.clone();
        }
        if let Some(database) = &self.database {
            connection.database = database.clone();
        }

        let generator = &mut config.generator;
        if self.no_strip_prefix {
            generator.strip_table_prefix = false;
        }
        if self.one_to_many {
            generator.one_to_many = true;
        }
        if self.many_to_one {
            generator.many_to_one = true;
        }
        if self.no_many_to_many {
            generator.many_to_many = false;
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli).await.unwrap_or_else(handle_error);
}

fn init_tracing(verbose: bool) {
    // stdout carries the JSON document, logs go to stderr
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let filter_layer = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("entity_scaffold=info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time();

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    cli.merge_into(&mut config);

    let source: Box<dyn SchemaSource> = match &cli.snapshot {
        Some(path) => Box::new(MemorySchema::from_json_file(path)?),
        None => Box::new(MySqlSchemaSource::connect(&config.connection).await?),
    };
    let model = EntityModelBuilder::new(source.as_ref(), config.generator)
        .build(&config.connection.database)
        .await;

    let context = config.render.now();
    JsonRenderer::new(std::io::stdout().lock()).render_model(&context, &model)?;

    if !model.is_complete() {
        tracing::warn!(
            "{} problem(s) were met, the model is incomplete",
            model.diagnostics.len()
        );
    }
    if cli.strict {
        model.into_result()?;
    }
    Ok(())
}

fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    exit(1);
}
