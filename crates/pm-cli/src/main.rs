use std::process::exit;

use pm_core::{EngineConfig, HistoryEngine, HistoryError, InMemoryEngineProvider, TreeMode};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Uso: pm-cli <records|flows|highlight|active|tree|top|vars> --instance <ID> [--snapshot <FILE>] [--historic]";

/// Argumentos ya parseados de la línea de comandos.
struct CliArgs {
    command: String,
    instance: String,
    snapshot: String,
    historic: bool,
}

fn main() {
    // Cargar .env si existe para obtener PM_SNAPSHOT y los techos de recursión
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args, dotenvy::var("PM_SNAPSHOT").ok()) {
        Some(c) => c,
        None => {
            eprintln!("{USAGE}");
            exit(2);
        }
    };

    let raw = match std::fs::read_to_string(&cli.snapshot) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[pm {}] no se pudo leer el snapshot {}: {e}", cli.command, cli.snapshot);
            exit(5);
        }
    };
    let provider = match InMemoryEngineProvider::from_json_str(&raw) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[pm {}] {e}", cli.command);
            exit(5);
        }
    };
    let engine = HistoryEngine::builder(provider).config(EngineConfig::from_env()).build();

    match run(&engine, &cli) {
        Ok(Some(out)) => {
            print!("{out}");
            exit(0);
        }
        Ok(None) => {
            eprintln!("{USAGE}");
            exit(2);
        }
        Err(e) if e.is_not_found() => {
            eprintln!("[pm {}] {e}", cli.command);
            exit(4);
        }
        Err(e) => {
            eprintln!("[pm {}] error: {e}", cli.command);
            exit(5);
        }
    }
}

/// `default_snapshot` se usa si no se pasa `--snapshot`.
fn parse_args(args: &[String], default_snapshot: Option<String>) -> Option<CliArgs> {
    let command = args.get(1)?.clone();
    let mut instance: Option<String> = None;
    let mut snapshot = default_snapshot;
    let mut historic = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--instance" => {
                i += 1;
                instance = Some(args.get(i)?.clone());
            }
            "--snapshot" => {
                i += 1;
                snapshot = Some(args.get(i)?.clone());
            }
            "--historic" => historic = true,
            _ => return None,
        }
        i += 1;
    }
    Some(CliArgs { command,
                   instance: instance?,
                   snapshot: snapshot?,
                   historic })
}

/// Ejecuta el subcomando. `Ok(None)` si el subcomando no existe.
fn run(engine: &HistoryEngine<InMemoryEngineProvider>, cli: &CliArgs) -> Result<Option<String>, HistoryError> {
    let id = cli.instance.as_str();
    let out = match cli.command.as_str() {
        "records" => lines(engine.historic_activity_records(id)?.iter().map(|r| {
                                                                        let tag = if r.is_synthetic() { " [synthetic]" } else { "" };
                                                                        format!("{} ({}){tag}", r.activity_id, r.activity_kind)
                                                                    })),
        "flows" => lines(engine.activity_flows(id)?.iter().map(ToString::to_string)),
        "highlight" => lines(engine.highlighted_flows(id)?),
        "active" => lines(engine.active_activity_ids(id)?),
        "tree" => {
            let mode = if cli.historic { TreeMode::Historical } else { TreeMode::ActiveOnly };
            pm_core::dump_instance_tree(&engine.instance_tree(id, mode)?)
        }
        "top" => format!("{}\n", engine.top_instance_id(id)?),
        // las variables de proceso viven en la instancia raíz
        "vars" => {
            let vars = engine.top_instance_variables(id)?;
            let json = serde_json::to_string_pretty(&vars).map_err(|e| HistoryError::Serialization(e.to_string()))?;
            format!("{json}\n")
        }
        _ => return Ok(None),
    };
    log::debug!("command '{}' for instance '{}' done", cli.command, id);
    Ok(Some(out))
}

fn lines<I, S>(items: I) -> String
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    let mut out = String::new();
    for item in items {
        out.push_str(item.as_ref());
        out.push('\n');
    }
    out
}
