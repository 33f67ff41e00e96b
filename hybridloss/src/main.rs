mod options;
mod scenario;

use anyhow::{anyhow, Error as AnyError};
use buildings::HybridBuildings;
use clap::Parser;
use options::{Cli, Command as CliCmd, Format};
use rayon::prelude::*;
use scenario::{Node, Scenario};
use serde::Serialize;
use std::io::Write;

fn main() -> Result<(), AnyError> {
    let Cli { scenario, cmd } = Cli::parse();

    env_logger::init();

    let scenario = Scenario::open(&scenario)?;
    let hybrid = scenario.model()?;
    let nodes = scenario.nodes()?;

    match cmd {
        CliCmd::Pair { a, b } => print_pair(&hybrid, &nodes, &a, &b),
        CliCmd::Matrix { format } => {
            let rows = matrix(&hybrid, &nodes)?;
            match format {
                Format::Csv => print_csv(&rows),
                Format::Json => print_json(&rows),
            }
        }
    }
}

fn find<'a>(nodes: &'a [Node], name: &str) -> Result<&'a Node, AnyError> {
    nodes
        .iter()
        .find(|node| node.name == name)
        .ok_or_else(|| anyhow!("no node named '{name}'"))
}

fn print_pair(hybrid: &HybridBuildings, nodes: &[Node], a: &str, b: &str) -> Result<(), AnyError> {
    let (a, b) = (find(nodes, a)?, find(nodes, b)?);
    let evaluation = hybrid.evaluate(&a.mobility, &b.mobility)?;
    println!("{}: {:.2} dB", evaluation.branch, evaluation.loss_db);
    Ok(())
}

#[derive(Serialize)]
struct Row<'a> {
    from: &'a str,
    to: &'a str,
    branch: String,
    loss_db: f64,
}

/// Evaluates every ordered pair of distinct nodes.
fn matrix<'a>(hybrid: &HybridBuildings, nodes: &'a [Node]) -> Result<Vec<Row<'a>>, AnyError> {
    nodes
        .par_iter()
        .flat_map_iter(|a| {
            nodes
                .iter()
                .filter(move |b| !std::ptr::eq(a, *b))
                .map(move |b| (a, b))
        })
        .map(|(a, b)| -> Result<Row<'a>, AnyError> {
            let evaluation = hybrid.evaluate(&a.mobility, &b.mobility)?;
            Ok(Row {
                from: &a.name,
                to: &b.name,
                branch: evaluation.branch.to_string(),
                loss_db: evaluation.loss_db,
            })
        })
        .collect()
}

fn print_csv(rows: &[Row<'_>]) -> Result<(), AnyError> {
    write_csv(std::io::stdout().lock(), rows)
}

fn write_csv(mut wtr: impl Write, rows: &[Row<'_>]) -> Result<(), AnyError> {
    writeln!(wtr, "From,To,Loss,Branch")?;
    for Row {
        from,
        to,
        branch,
        loss_db,
    } in rows
    {
        writeln!(wtr, "{from},{to},{loss_db},\"{branch}\"")?;
    }
    Ok(())
}

fn print_json(rows: &[Row<'_>]) -> Result<(), AnyError> {
    write_json(std::io::stdout().lock(), rows)
}

fn write_json(mut wtr: impl Write, rows: &[Row<'_>]) -> Result<(), AnyError> {
    serde_json::to_writer(&mut wtr, rows)?;
    writeln!(wtr)?;
    Ok(())
}
