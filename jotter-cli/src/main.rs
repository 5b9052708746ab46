#![forbid(unsafe_code)]

fn main() {
    std::process::exit(jotter_cli::run());
}
