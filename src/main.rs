fn main() {
    if let Err(e) = mediglove_lib::run() {
        eprintln!("mediglove: {e}");
        std::process::exit(1);
    }
}
