use crate::cli::RunArgs;
use compatgen_golist::GoListResolver;
use compatgen_source::{
    DirectoryResolver, GenerateOptions, PackageResolver, RunReport, SourceError, generate,
};
use tracing_subscriber::EnvFilter;

pub const EXIT_POLICY: i32 = 1;
pub const EXIT_ENVIRONMENT: i32 = 2;

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn resolver_for(args: &RunArgs) -> Box<dyn PackageResolver> {
    if args.dir {
        tracing::debug!("resolving packages as directories");
        return Box::new(DirectoryResolver);
    }
    tracing::debug!(workdir = ?args.go_workdir, "resolving packages with go list");
    match &args.go_workdir {
        Some(workdir) => Box::new(GoListResolver::in_dir(workdir)),
        None => Box::new(GoListResolver::new()),
    }
}

/// Policy failures exit 1; resolution, parse and I/O failures exit 2.
pub fn exit_code_for(err: &SourceError) -> i32 {
    if err.is_policy_failure() {
        EXIT_POLICY
    } else {
        EXIT_ENVIRONMENT
    }
}

pub fn generate_or_exit(args: &RunArgs, dry_run: bool) -> RunReport {
    let resolver = resolver_for(args);
    generate(&args.packages, &resolver, GenerateOptions { dry_run }).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(exit_code_for(&e));
    })
}

pub fn print_report(command: &str, report: &RunReport, json_output: bool) {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(report).expect("json serialization")
        );
        return;
    }

    println!("compatibility-gen {command}");
    for package in &report.packages {
        println!(
            "  Package: {} ({} units, {} changed)",
            package.package, package.units, package.changed_units
        );
    }
    println!("  Result: {}", report.result);
    println!("  Unchanged files: {}", report.unchanged_files);
    if report.changed_files.is_empty() {
        return;
    }
    let label = if report.dry_run {
        "Out of date"
    } else {
        "Rewritten"
    };
    println!("  {label}:");
    for file in &report.changed_files {
        println!("    - {}", file.path.display());
    }
}
