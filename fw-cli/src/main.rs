use clap::Parser;

fn main() {
    let opts = fw_cli::Opts::parse();
    let log = fw_cli::build_logger(opts.verbose);

    let code = match fw_cli::run(&opts, &log) {
        Ok(verdict) => fw_cli::report(verdict),
        Err(e) => {
            eprintln!("error: {e:#}");
            2
        }
    };
    std::process::exit(code);
}
