use crate::cli::RunArgs;
use crate::support::{EXIT_POLICY, generate_or_exit, print_report};

/// Dry run that fails when any unit would be rewritten.
pub fn run(args: RunArgs) {
    let report = generate_or_exit(&args, true);
    print_report("check", &report, args.json);
    if report.has_changes() {
        eprintln!(
            "error: compatibility comments are out of date in {} file(s); run `compatibility-gen generate`",
            report.changed_files.len()
        );
        std::process::exit(EXIT_POLICY);
    }
}
