mod app;
mod cli;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::MicrocarApp;
use cli::Invocation;
use eframe::egui;
use microcar_compare::run_batch;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match cli::parse_args(&args) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("Invalid input: {e:#}\n\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    match invocation {
        Invocation::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Invocation::Report(request) => match run_batch(&request) {
            Ok(results) => {
                let json = serde_json::to_string_pretty(&results).context("serialising results")?;
                println!("{json}");
                Ok(())
            }
            Err(e) => {
                log::error!("Batch aborted: {e}");
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        Invocation::View(request) => {
            let mut state = AppState::default();
            if let Some(request) = request {
                state.run(&request);
            }
            run_viewer(state)
        }
    }
}

fn run_viewer(state: AppState) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 850.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Microcar Compare",
        options,
        Box::new(|_cc| Ok(Box::new(MicrocarApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
