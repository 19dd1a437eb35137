// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::{Gateway, ProjectChanges};
use crate::models::NewProject;
use crate::utils::{
    fmt_money, id_for_project, maybe_print_json, parse_decimal, pretty_table, require_current_user,
};
use anyhow::Result;

pub fn handle(gateway: &Gateway, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(gateway, sub)?,
        Some(("list", sub)) => list(gateway, sub)?,
        Some(("update", sub)) => update(gateway, sub)?,
        Some(("rm", sub)) => rm(gateway, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_current_user(gateway.connection())?;
    let input = NewProject {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        location: sub
            .get_one::<String>("location")
            .unwrap()
            .trim()
            .to_string(),
        project_type: sub.get_one::<String>("type").unwrap().trim().to_string(),
        base_contract_amount: parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?,
    };
    let project = gateway.insert_project(&user, &input)?;
    println!(
        "Added project '{}' at {} ({}, contract {})",
        project.name,
        project.location,
        project.project_type,
        fmt_money(&project.base_contract_amount)
    );
    Ok(())
}

fn list(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = require_current_user(gateway.connection())?;
    let projects = gateway.list_projects_for_user(&user)?;
    if !maybe_print_json(json_flag, jsonl_flag, &projects)? {
        let rows: Vec<Vec<String>> = projects
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.location.clone(),
                    p.project_type.clone(),
                    fmt_money(&p.base_contract_amount),
                    p.created_at.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Location", "Type", "Contract", "Created"], rows)
        );
    }
    Ok(())
}

fn update(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_current_user(gateway.connection())?;
    let name = sub.get_one::<String>("name").unwrap().trim();
    let project_id = id_for_project(gateway.connection(), &user, name)?;
    let changes = ProjectChanges {
        name: sub.get_one::<String>("rename").map(|s| s.trim().to_string()),
        location: sub
            .get_one::<String>("location")
            .map(|s| s.trim().to_string()),
        project_type: sub.get_one::<String>("type").map(|s| s.trim().to_string()),
        base_contract_amount: match sub.get_one::<String>("amount") {
            Some(raw) => Some(parse_decimal(raw.trim())?),
            None => None,
        },
    };
    let project = gateway.update_project(&user, project_id, &changes)?;
    println!("Updated project '{}'", project.name);
    Ok(())
}

fn rm(gateway: &Gateway, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_current_user(gateway.connection())?;
    let name = sub.get_one::<String>("name").unwrap().trim();
    let project_id = id_for_project(gateway.connection(), &user, name)?;
    gateway.delete_project(&user, project_id)?;
    println!("Removed project '{}' and its transactions", name);
    Ok(())
}
