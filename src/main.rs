use std::process;

fn main() {
    if let Err(e) = argot::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
