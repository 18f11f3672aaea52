fn main() {
    match enrollhub::run_cli(std::env::args().skip(1)) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("enrollhub fatal: {e:#}");
            std::process::exit(1);
        }
    }
}
