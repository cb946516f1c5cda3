use std::process::ExitCode;

fn main() -> ExitCode {
    cloud_manus::run_main(std::env::args_os())
}
