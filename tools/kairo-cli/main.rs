use clap::Parser;
use itertools::Itertools;
use kairo::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Drive a logic circuit from a command script or an interactive prompt
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a command script; commands are read from stdin when omitted
    script_path: Option<String>,

    /// Refuse wires that would close a feedback loop
    #[arg(long)]
    reject_cycles: bool,

    /// Print the final node values as JSON
    #[arg(long)]
    json: bool,

    /// Show a prompt before each command
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,

    /// Log wiring activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

// --- Command Parsing ---
// One command per line; ids may be written with or without their prefix (N3 or 3).

#[derive(Debug)]
enum Command {
    Gate(GateKind, Position),
    Source(bool, Position),
    Sink(Position),
    Move(NodeId, Position),
    Delete(NodeId),
    Begin(TerminalId),
    Complete(WireId, TerminalId),
    Cancel(WireId),
    Connect(TerminalId, TerminalId),
    Unwire(WireId),
    Disconnect(TerminalId),
    Value(TerminalId),
    Explain(TerminalId),
    Connections(NodeId),
    Show,
    Clear,
    Help,
    Quit,
}

fn parse_id(token: Option<&str>, prefix: char, what: &str) -> Result<u32, String> {
    let token = token.ok_or_else(|| format!("missing {} id", what))?;
    let digits = token
        .strip_prefix(prefix)
        .or_else(|| token.strip_prefix(prefix.to_ascii_lowercase()))
        .unwrap_or(token);
    digits
        .parse()
        .map_err(|_| format!("'{}' is not a {} id", token, what))
}

fn parse_position(mut args: std::str::SplitWhitespace<'_>) -> Result<Position, String> {
    match (args.next(), args.next()) {
        (None, _) => Ok(Position::default()),
        (Some(x), Some(y)) => {
            let x = f32::from_str(x).map_err(|_| format!("bad x coordinate '{}'", x))?;
            let y = f32::from_str(y).map_err(|_| format!("bad y coordinate '{}'", y))?;
            Ok(Position::new(x, y))
        }
        (Some(_), None) => Err("a position needs both x and y".to_string()),
    }
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut args = line.split_whitespace();
    let Some(verb) = args.next() else {
        return Ok(None);
    };

    let node = |t: Option<&str>| parse_id(t, 'N', "node").map(NodeId);
    let terminal = |t: Option<&str>| parse_id(t, 'T', "terminal").map(TerminalId);
    let wire = |t: Option<&str>| parse_id(t, 'W', "wire").map(WireId);

    let command = match verb.to_ascii_lowercase().as_str() {
        "gate" => {
            let kind = args.next().ok_or("missing gate kind")?;
            let kind = GateKind::from_str(kind).map_err(|e| e.to_string())?;
            Command::Gate(kind, parse_position(args)?)
        }
        "source" => {
            let value = match args.next() {
                Some("0") => false,
                Some("1") => true,
                other => return Err(format!("source value must be 0 or 1, got {:?}", other)),
            };
            Command::Source(value, parse_position(args)?)
        }
        "sink" | "bulb" => Command::Sink(parse_position(args)?),
        "move" => {
            let id = node(args.next())?;
            Command::Move(id, parse_position(args)?)
        }
        "delete" => Command::Delete(node(args.next())?),
        "begin" => Command::Begin(terminal(args.next())?),
        "complete" => Command::Complete(wire(args.next())?, terminal(args.next())?),
        "cancel" => Command::Cancel(wire(args.next())?),
        "connect" => Command::Connect(terminal(args.next())?, terminal(args.next())?),
        "unwire" => Command::Unwire(wire(args.next())?),
        "disconnect" => Command::Disconnect(terminal(args.next())?),
        "value" => Command::Value(terminal(args.next())?),
        "explain" => Command::Explain(terminal(args.next())?),
        "connections" => Command::Connections(node(args.next())?),
        "show" => Command::Show,
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

// --- Execution ---

fn describe_node(circuit: &Circuit, id: NodeId) -> kairo::Result<String> {
    let node = circuit.node(id)?;
    let terminals = node.terminals().map(|t| t.to_string()).join(" ");
    Ok(format!(
        "{} {} [{}] = {}",
        node.id,
        node.kind,
        terminals,
        circuit.node_value(id)?
    ))
}

/// Runs one command. `Ok(false)` asks the caller to stop.
fn execute(circuit: &mut Circuit, command: Command) -> kairo::Result<bool> {
    match command {
        Command::Gate(kind, position) => {
            let id = circuit.place_gate(kind, position);
            println!("{}", describe_node(circuit, id)?);
        }
        Command::Source(value, position) => {
            let id = circuit.place_source(value, position);
            println!("{}", describe_node(circuit, id)?);
        }
        Command::Sink(position) => {
            let id = circuit.place_sink(position);
            println!("{}", describe_node(circuit, id)?);
        }
        Command::Move(id, position) => circuit.move_node(id, position)?,
        Command::Delete(id) => {
            let removed = circuit.delete_node(id)?;
            println!("deleted {} and {} wire(s)", id, removed.len());
        }
        Command::Begin(source) => println!("{} pending", circuit.begin_wire(source)?),
        Command::Complete(wire, target) => print_binding(circuit.complete_wire(wire, target)?),
        Command::Cancel(wire) => {
            if !circuit.cancel_wire(wire)? {
                println!("{} was already gone", wire);
            }
        }
        Command::Connect(source, target) => {
            let wire = circuit.begin_wire(source)?;
            print_binding(circuit.complete_wire(wire, target)?);
        }
        Command::Unwire(wire) => {
            circuit.remove_wire(wire)?;
        }
        Command::Disconnect(terminal) => {
            let removed = circuit.disconnect(terminal)?;
            println!("removed {}", removed.iter().join(", "));
        }
        Command::Value(terminal) => println!("{} = {}", terminal, circuit.value_of(terminal)?),
        Command::Explain(terminal) => println!("{}", circuit.explain(terminal)?),
        Command::Connections(id) => {
            for summary in circuit.connections_of(id)? {
                let peers = if summary.is_connected() {
                    summary
                        .peers
                        .iter()
                        .map(|p| format!("{} via {}", p.label, p.wire))
                        .join(", ")
                } else {
                    "None".to_string()
                };
                println!(
                    "  {} {:<6} -> {} (value {})",
                    summary.terminal, summary.slot, peers, summary.value
                );
            }
        }
        Command::Show => {
            for node in circuit.nodes() {
                println!("{}", describe_node(circuit, node.id)?);
            }
            for wire in circuit.wires() {
                match wire.target {
                    Some(target) => println!("{}: {} -> {}", wire.id, wire.source, target),
                    None => println!("{}: {} -> (pending)", wire.id, wire.source),
                }
            }
        }
        Command::Clear => circuit.clear(),
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_binding(binding: Binding) {
    match binding.replaced {
        Some(old) => println!("{} bound (replaced {})", binding.wire, old),
        None => println!("{} bound", binding.wire),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  gate <AND|OR|NOT|NAND|NOR|XOR> [x y]   source <0|1> [x y]   sink [x y]");
    println!("  move <node> <x> <y>   delete <node>   clear");
    println!("  begin <terminal>   complete <wire> <terminal>   cancel <wire>");
    println!("  connect <terminal> <terminal>   unwire <wire>   disconnect <terminal>");
    println!("  value <terminal>   explain <terminal>   connections <node>   show   quit");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let policy = if cli.reject_cycles {
        CyclePolicy::Reject
    } else {
        CyclePolicy::Undefined
    };
    let mut circuit = Circuit::builder().with_cycle_policy(policy).build();

    let lines: Vec<String> = match &cli.script_path {
        Some(path) => fs::read_to_string(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read script '{}': {}", path, e)))
            .lines()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    if cli.script_path.is_some() {
        for (number, line) in lines.iter().enumerate() {
            if !run_line(&mut circuit, line, Some(number + 1)) {
                break;
            }
        }
    } else {
        if cli.human {
            println!("--- Kairo Interactive Mode --- (type 'help')");
        }
        let stdin = io::stdin();
        loop {
            if cli.human {
                print!("> ");
                let _ = io::stdout().flush();
            }
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if !run_line(&mut circuit, &line, None) {
                        break;
                    }
                }
                Err(e) => exit_with_error(&format!("Failed to read command: {}", e)),
            }
        }
    }

    if cli.json {
        let snapshot = circuit
            .recompute_all()
            .unwrap_or_else(|e| exit_with_error(&format!("Evaluation failed: {}", e)));
        let ordered: BTreeMap<NodeId, Signal> = snapshot.into_iter().collect();
        let json = serde_json::to_string_pretty(&ordered)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode snapshot: {}", e)));
        println!("{}", json);
    }
}

/// Parses and executes one line, reporting errors without stopping.
/// Returns `false` once the script asks to quit.
fn run_line(circuit: &mut Circuit, line: &str, number: Option<usize>) -> bool {
    let location = number.map_or(String::new(), |n| format!(" (line {})", n));
    match parse_command(line) {
        Ok(None) => true,
        Ok(Some(command)) => match execute(circuit, command) {
            Ok(keep_going) => keep_going,
            Err(e) => {
                eprintln!("Error{}: {}", location, e);
                true
            }
        },
        Err(message) => {
            eprintln!("Error{}: {}", location, message);
            true
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
