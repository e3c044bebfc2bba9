//! runner - runs a scheduling scenario and prints what happened
//!
//! Usage: runner [OPTIONS] <SCENARIO>

use std::process::ExitCode;

use scheduler::{PolicyKind, Scenario, Trace};

struct Options {
    path: String,
    policy: Option<PolicyKind>,
    quiet: bool,
}

fn print_usage() {
    println!("Usage: runner [OPTIONS] <SCENARIO>");
    println!();
    println!("Options:");
    println!("  -p, --policy <NAME>   run with this policy instead of the scenario's");
    println!("  -q, --quiet           print only the per process summary");
    println!("  -l, --list            list the available policies");
    println!("  -h, --help            print this help");
    println!("  -V, --version         print the version");
}

fn print_policies() {
    for policy in PolicyKind::ALL {
        println!("{:<6} {policy}", policy.short_name());
    }
}

/// Returns the exit code instead when there is nothing left to run
fn parse_args(args: &[String]) -> Result<Options, ExitCode> {
    let mut path = None;
    let mut policy = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return Err(ExitCode::SUCCESS);
            }
            "-V" | "--version" => {
                println!("runner {}", env!("CARGO_PKG_VERSION"));
                return Err(ExitCode::SUCCESS);
            }
            "-l" | "--list" => {
                print_policies();
                return Err(ExitCode::SUCCESS);
            }
            "-q" | "--quiet" => quiet = true,
            "-p" | "--policy" => {
                i += 1;
                let Some(name) = args.get(i) else {
                    eprintln!("--policy needs a name");
                    return Err(ExitCode::from(1));
                };

                match name.parse::<PolicyKind>() {
                    Ok(kind) => policy = Some(kind),
                    Err(e) => {
                        eprintln!("{e}");
                        return Err(ExitCode::from(1));
                    }
                }
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {arg}");
                return Err(ExitCode::from(1));
            }
            arg => {
                if path.replace(arg.to_string()).is_some() {
                    eprintln!("Only one scenario can be run at a time");
                    return Err(ExitCode::from(1));
                }
            }
        }
        i += 1;
    }

    let Some(path) = path else {
        print_usage();
        return Err(ExitCode::from(1));
    };

    Ok(Options {
        path,
        policy,
        quiet,
    })
}

fn print_summary(trace: &Trace) {
    println!(
        "{:<6} {:>8} {:>9} {:>9} {:>6} {:>7} {:>11} {:>8}",
        "pid", "priority", "arrival", "lifespan", "start", "finish", "turnaround", "waiting"
    );

    let show = |value: Option<usize>| value.map_or("-".to_string(), |value| value.to_string());
    for record in trace.records.values() {
        println!(
            "{:<6} {:>8} {:>9} {:>9} {:>6} {:>7} {:>11} {:>8}",
            record.pid.to_string(),
            record.priority,
            record.arrival,
            record.lifespan,
            show(record.start),
            show(record.finish),
            show(record.turnaround()),
            show(record.waiting())
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(code) => return code,
    };

    let mut scenario = match Scenario::load(&options.path) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("{}: {e}", options.path);
            return ExitCode::from(1);
        }
    };

    if let Some(policy) = options.policy {
        scenario.scheduler.policy = policy;
    }

    log::info!(
        "running {} processes from {} with {}",
        scenario.processes.len(),
        options.path,
        scenario.scheduler.policy
    );

    let trace = match scheduler::simulate(&scenario) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    if !options.quiet {
        println!("{}", scenario.scheduler.policy);
        println!("{}", trace.render());
        println!();
    }
    print_summary(&trace);

    ExitCode::SUCCESS
}
