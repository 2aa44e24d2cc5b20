//! Sejour
//!
//! Desktop client for the Sejour booking marketplace: residences, hotels,
//! restaurants and lounges.
//!
//! This is the main entry point for the Dioxus Desktop application.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Initialize logging (RUST_LOG overrides the default level)
    let _subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .pretty()
        .init();

    // Print startup banner
    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   🏨 Sejour v{:<45}║", sejour_ui::VERSION);
    println!("║   Residences, Hotels, Restaurants & Lounges               ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    // Launch the Dioxus desktop application
    sejour_ui::launch();
}
