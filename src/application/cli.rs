use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use quickedit::domain::models::EditProps;
use quickedit::domain::services::identity::compute_session_id;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn props_from_matches(matches: &ArgMatches) -> Result<EditProps> {
    let query = match matches.get_one::<String>("query") {
        Some(query) => query,
        None => bail!("A query is required"),
    };
    let variables = matches
        .get_one::<String>("variables")
        .map(|e| return e.as_str())
        .unwrap_or("{}");
    let data = matches
        .get_one::<String>("data")
        .map(|e| return e.as_str())
        .unwrap_or("{}");

    return EditProps::from_json(query, variables, data);
}

fn arg_query() -> Arg {
    return Arg::new("query")
        .short('q')
        .long("query")
        .num_args(1)
        .help("Query the page's content was fetched with.")
        .required(true);
}

fn arg_variables() -> Arg {
    return Arg::new("variables")
        .short('v')
        .long("variables")
        .num_args(1)
        .help("Query variables as a JSON object. [default: {}]");
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_id() -> Command {
    return Command::new("id")
        .about("Prints the session id the editor will see for a query and its variables.")
        .arg(arg_query())
        .arg(arg_variables());
}

fn subcommand_run() -> Command {
    return Command::new("run")
        .about("Mounts a headless page session. Editor events and clicks are read as JSON lines from stdin, messages for the editor are written as JSON lines to stdout.")
        .arg(arg_query())
        .arg(arg_variables())
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .num_args(1)
                .help("Initial page data as JSON. [default: {}]"),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("quickedit")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_id())
        .subcommand(subcommand_run())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("QUICKEDIT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::BodyClass.to_string())
                .long(ConfigKey::BodyClass.to_string())
                .env("QUICKEDIT_BODY_CLASS")
                .num_args(1)
                .help(format!("Class added to the page body while quick-edit is enabled. [default: {}]", Config::default(ConfigKey::BodyClass)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::FieldAttribute.to_string())
                .long(ConfigKey::FieldAttribute.to_string())
                .env("QUICKEDIT_FIELD_ATTRIBUTE")
                .num_args(1)
                .help(format!("Attribute prefix marking editable fields on the page. [default: {}]", Config::default(ConfigKey::FieldAttribute)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Origin.to_string())
                .short('o')
                .long(ConfigKey::Origin.to_string())
                .env("QUICKEDIT_ORIGIN")
                .num_args(1)
                .help(format!("Origin of the editor window. Messages from any other origin are ignored. [default: {}]", Config::default(ConfigKey::Origin)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Page.to_string())
                .short('p')
                .long(ConfigKey::Page.to_string())
                .env("QUICKEDIT_PAGE")
                .num_args(1)
                .help("Path to a JSON page description used as the document.")
                .global(true),
        );
}

/// Parses arguments and loads config. Returns the props to mount when a page
/// session should be started.
pub async fn parse() -> Result<Option<EditProps>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        Some(("id", subcmd_matches)) => {
            let props = props_from_matches(subcmd_matches)?;
            let id = compute_session_id(&props.query, &props.variables)?;
            println!("{id}");
        }
        Some(("run", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(props_from_matches(subcmd_matches)?));
        }
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(None);
}
