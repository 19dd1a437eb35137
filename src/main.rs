// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use siteledger::{cli, commands, db, gateway::Gateway};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let gateway = Gateway::new(conn);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&gateway, sub)?,
        Some(("project", sub)) => commands::projects::handle(&gateway, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&gateway, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&gateway, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&gateway, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&gateway)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
