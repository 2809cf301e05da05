fn main() {
    env_logger::init();
    if let Err(err) = helm_rs_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
