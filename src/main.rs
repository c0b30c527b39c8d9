use std::process::ExitCode;

fn main() -> ExitCode {
    match nexmeta::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            nexmeta::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
