use std::process::ExitCode;

fn main() -> ExitCode {
    quickstart_lib::run()
}
