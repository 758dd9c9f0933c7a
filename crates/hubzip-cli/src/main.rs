use hubzip_lib::cli::{parse_args, report_error, run};
use hubzip_lib::download::GITHUB_BASE_URL;
use std::process::ExitCode;

const PROGRAM: &str = "hubzip";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    if let Err(error) = color_eyre::install() {
        eprintln!("{PROGRAM}: error: {error}");
        return ExitCode::FAILURE;
    }

    let options = parse_args();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("{PROGRAM}: error: failed to resolve the working directory: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    match run(&options, GITHUB_BASE_URL, &working_dir, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(PROGRAM, &error);
            ExitCode::FAILURE
        }
    }
}
