use crate::cli::RunArgs;
use crate::support::{generate_or_exit, print_report};

pub fn run(args: RunArgs) {
    let report = generate_or_exit(&args, false);
    print_report("generate", &report, args.json);
}
