#![forbid(unsafe_code)]

fn main() {
    glide_harness::init_logging();
    if let Err(error) = glide_harness::run_from_env() {
        eprintln!(
            "{}",
            serde_json::json!({
                "status": "error",
                "error": error.to_string(),
                "exit_code": error.exit_code(),
            })
        );
        std::process::exit(error.exit_code());
    }
}
