use clap::Parser;
use gitsnap::cli::{
    self,
    args::{CliArgs, Command},
    command_handlers,
};

fn run() -> anyhow::Result<()> {
    let cli_args = CliArgs::parse();

    match cli_args.cmd {
        Command::Clone {
            url,
            revision,
            commit,
            workdir,
            username,
            password,
            token,
        } => {
            let credentials = cli::resolve_credentials(username, password, token);
            command_handlers::do_clone(url, revision, commit, workdir, credentials)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
