// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::utils::{get_current_user, set_current_user};
use anyhow::Result;

pub fn handle(gateway: &Gateway, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            set_current_user(gateway.connection(), id)?;
            println!("Acting user set to '{}'", id);
        }
        Some(("show", _)) => match get_current_user(gateway.connection())? {
            Some(id) => println!("{}", id),
            None => println!("(none)"),
        },
        _ => {}
    }
    Ok(())
}
