//! Levelwire - logic-puzzle solver for game level maps
//!
//! # Usage
//!
//! ```bash
//! levelwire solve level.json --force-input lever_3
//! levelwire export level.json vault.v --door vault
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use levelwire::{
    error::{CircuitError, Result},
    map, Graph,
};
use tracing::Level;

/// Logic-puzzle wiring solver and netlist exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find an input pattern that opens the chosen doors
    Solve {
        /// Path to the Tiled map (.json)
        #[arg(value_name = "MAP_FILE")]
        map_file: PathBuf,

        /// Treat this node as an input fixed to true (repeatable)
        #[arg(long = "force-input", value_name = "NAME")]
        force_input: Vec<String>,

        /// Door to open (repeatable); prompts interactively when omitted
        #[arg(long = "door", value_name = "NAME")]
        doors: Vec<String>,
    },

    /// Write the logic feeding the chosen doors as a Verilog netlist
    Export {
        /// Path to the Tiled map (.json)
        #[arg(value_name = "MAP_FILE")]
        map_file: PathBuf,

        /// Output netlist path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Door to export (repeatable); all doors when omitted
        #[arg(long = "door", value_name = "NAME")]
        doors: Vec<String>,

        /// Treat this node as an input fixed to true (repeatable)
        #[arg(long = "force-input", value_name = "NAME")]
        force_input: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Solve {
            map_file,
            force_input,
            doors,
        } => {
            let mut graph = load_graph(&map_file)?;
            let doors = if doors.is_empty() {
                prompt_doors(&graph).map_err(|source| CircuitError::Prompt { source })?
            } else {
                doors
            };
            for name in &force_input {
                graph.mark_as_input(name)?;
            }

            let assignment = graph.solve(&doors)?;
            print!("{}", assignment);
        }

        Command::Export {
            map_file,
            output,
            doors,
            force_input,
        } => {
            let mut graph = load_graph(&map_file)?;
            for name in &force_input {
                graph.mark_as_input(name)?;
            }

            let doors = if doors.is_empty() {
                graph.sinks().iter().map(|node| node.name.clone()).collect()
            } else {
                doors
            };
            let netlist = graph.extract(&doors)?;
            netlist.write(&output)?;
            println!("Wrote {} doors to {}", netlist.outputs.len(), output.display());
        }
    }

    Ok(())
}

/// Load, ingest and build the map, reporting what was found.
fn load_graph(path: &Path) -> Result<Graph> {
    let tiled = map::load(path)?;
    println!(
        "Loaded map {} (generated by {})",
        path.display(),
        tiled.tiled_version.as_deref().unwrap_or("unknown")
    );
    println!("Object layers:");
    for layer in tiled.object_layers() {
        println!("  {}", layer.name);
    }

    let mut graph = Graph::new();
    map::ingest(&tiled, &mut graph)?;
    graph.build()?;
    println!(
        "Parsed {} objects, {} named ones and {} circuit-related.",
        graph.record_count(),
        graph.named_count(),
        graph.len()
    );

    println!("Doors:");
    for node in graph.sinks() {
        println!("  {}", node.name);
    }
    Ok(graph)
}

/// Ask for door names on stdin until an empty line or EOF.
fn prompt_doors(graph: &Graph) -> io::Result<Vec<String>> {
    read_doors(graph, io::stdin().lock(), io::stdout())
}

fn read_doors(graph: &Graph, input: impl BufRead, mut output: impl Write) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut lines = input.lines();
    loop {
        write!(output, "Door to open (empty to quit): ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let name = line.trim();
        if name.is_empty() {
            break;
        }
        if graph.node(name).is_none() {
            writeln!(output, "Unknown door {}", name)?;
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
