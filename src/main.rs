use std::process::ExitCode;

use versionstamp::cli::{self, Cli};
use versionstamp::ui::output::{self, Verbosity};

fn main() -> ExitCode {
    let args = Cli::parse_args();
    setup_logging(Verbosity::from_flags(args.quiet, args.debug));

    match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(2)
        }
    }
}

fn setup_logging(verbosity: Verbosity) {
    env_logger::Builder::new()
        .filter_level(verbosity.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
