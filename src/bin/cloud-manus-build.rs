use std::process::ExitCode;

fn main() -> ExitCode {
    cloud_manus::build_main(std::env::args_os())
}
