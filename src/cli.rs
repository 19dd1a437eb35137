// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("siteledger")
        .version(crate_version!())
        .about("Construction project expense tracking and profit dashboards")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Select or show the acting user")
                .subcommand(
                    Command::new("set")
                        .about("Select the acting user")
                        .arg(Arg::new("id").required(true).help("User identifier")),
                )
                .subcommand(Command::new("show").about("Show the acting user")),
        )
        .subcommand(
            Command::new("project")
                .about("Manage projects")
                .subcommand(
                    Command::new("add")
                        .about("Create a project")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("location").long("location").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Project type, e.g. residential"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Base contract amount"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List projects")))
                .subcommand(
                    Command::new("update")
                        .about("Update a project")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("rename").long("rename").help("New name"))
                        .arg(Arg::new("location").long("location"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("amount").long("amount")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a project and all its transactions")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a credit or debit against a project")
                        .arg(Arg::new("project").long("project").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("credit|debit"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("project").long("project"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Portfolio profit/loss dashboard")
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .help("Reference date YYYY-MM-DD, defaults to today"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON"),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the acting user's transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Data integrity checks"))
}
