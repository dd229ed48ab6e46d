pub mod seed;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(about = "Multi-tenant website builder backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Create the initial admin account and optional demo tenant")]
    Seed {
        #[arg(long, default_value = "admin", help = "Admin username")]
        username: String,

        #[arg(long, default_value = "admin", help = "Admin password")]
        password: String,

        #[arg(long, help = "Also create a demo tenant with placeholder content")]
        demo: bool,
    },
}
