use colored::Colorize;
use structopt::StructOpt;

use dvscript::cli::auth::{AuthProfile, AuthSubCommand};
use dvscript::cli::base::{exit_with_error, CliContext, Matcher};
use dvscript::cli::dataset::DatasetSubCommand;
use dvscript::cli::dataverse::DataverseSubCommand;
use dvscript::credential::ApiKey;
use dvscript::error::DataverseError;

static HEADER: &str = r#"
--- dvscript: Dataverse from the command line ---
"#;

#[derive(StructOpt, Debug)]
struct GlobalOpts {
    /// Profile name to use for configuration
    #[structopt(short, long)]
    profile: Option<String>,
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Script a Dataverse instance through its native API")]
struct Cli {
    #[structopt(flatten)]
    global: GlobalOpts,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    Dataverse(DataverseSubCommand),
    Dataset(DatasetSubCommand),
    Auth(AuthSubCommand),
}

fn main() {
    let cli = Cli::from_args();

    // Storing a profile does not talk to any instance
    let cmd = match cli.cmd {
        Command::Auth(cmd) => {
            if let Err(e) = cmd.process() {
                exit_with_error(&e);
            }
            return;
        }
        cmd => cmd,
    };

    let context = match setup_context(cli.global.profile.as_deref()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("\n{} {}\n", "Error:".red().bold(), e);
            std::process::exit(exitcode::CONFIG);
        }
    };

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cmd {
        Command::Dataverse(command) => command.process(&context),
        Command::Dataset(command) => command.process(&context),
        Command::Auth(_) => {}
    }
}

fn setup_context(profile: Option<&str>) -> Result<CliContext, DataverseError> {
    match profile {
        Some(name) => {
            let profile = AuthProfile::get_from_keyring(name)?;
            CliContext::new(profile.url(), profile.token().clone())
        }
        None => {
            let (base_url, token) = extract_config_from_env()?;
            CliContext::new(base_url, token)
        }
    }
}

// Reads the base URL and API token from DVCLI_URL and DVCLI_TOKEN
fn extract_config_from_env() -> Result<(String, ApiKey), DataverseError> {
    let base_url = std::env::var("DVCLI_URL").map_err(|_| {
        DataverseError::Precondition(
            "Neither a profile nor a base URL was given. Set DVCLI_URL or use --profile."
                .to_string(),
        )
    })?;

    let token = std::env::var("DVCLI_TOKEN")
        .ok()
        .and_then(|token| token.parse::<ApiKey>().ok())
        .ok_or_else(|| {
            DataverseError::Precondition(
                "No API token was given. Set DVCLI_TOKEN or use --profile.".to_string(),
            )
        })?;

    Ok((base_url, token))
}
