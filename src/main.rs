fn main() {
    fluentconf::init_tracing();
    std::process::exit(fluentconf::run_cli(std::env::args().collect()));
}
