fn main() {
    if let Err(e) = contextflow::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
