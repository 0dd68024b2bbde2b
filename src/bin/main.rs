//! Binary entrypoint for the taskdeck tool

fn main() -> Result<(), Box<dyn std::error::Error>> {
    taskdeck::cli::run()
}
