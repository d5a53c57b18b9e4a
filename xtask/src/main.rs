use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the hospital queue simulation workspace",
    long_about = "A unified CLI for running simulations, staffing sweeps, benchmarks,\n\
                  and CI checks in the hospital queue simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the default scenario (3 doctors, arrival rate 0.4, eight-hour shift)
    Run,
    /// Run a staffing sweep and write the comparison table plus per-run reports
    Sweep {
        /// Pre-defined experiment to run
        #[arg(value_enum, default_value_t = Preset::HospitalComparison)]
        preset: Preset,
        /// Output directory
        #[arg(long, default_value = "sweep-output")]
        out_dir: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in sim_core)
    LoadTest,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    HospitalComparison,
    SingleWard,
    CapacitySweep,
    Minimal,
}

impl Preset {
    fn name(self) -> &'static str {
        match self {
            Self::HospitalComparison => "hospital_comparison",
            Self::SingleWard => "single_ward",
            Self::CapacitySweep => "capacity_sweep",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run examples
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    Command::new(program).args(args).status().unwrap_or_else(|err| {
        eprintln!("failed to execute {program}: {err}");
        exit(1);
    })
}

fn run_checked(program: &str, args: &[&str]) {
    let status = spawn(program, args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run_checked("cargo", args);
}

fn run_git(args: &[&str]) {
    run_checked("git", args);
}

fn run_sweep(preset: Preset, out_dir: &str) {
    run_cargo(&[
        "run",
        "-p",
        "sim_experiments",
        "--example",
        "parameter_sweep",
        "--release",
        "--",
        preset.name(),
        out_dir,
    ]);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test sim_core");
    run_cargo(&["test", "-p", "sim_core"]);

    step("Test sim_experiments");
    run_cargo(&["test", "-p", "sim_experiments"]);
}

fn ci_examples() {
    step("Run scenario_run (3 doctors, 28 800 time units)");
    run_cargo(&[
        "run",
        "-p",
        "sim_core",
        "--example",
        "scenario_run",
        "--release",
    ]);

    step("Run parameter_sweep (minimal preset)");
    let out_dir = std::env::temp_dir().join("hospital-sim-ci-sweep");
    run_sweep(Preset::Minimal, &out_dir.to_string_lossy());
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "sim_core", "--bench", "performance"]);
}

fn bench_compare() {
    let baseline_dir = Path::new("target/criterion");
    if baseline_dir.exists() {
        step("Removing existing benchmark data");
        if let Err(err) = std::fs::remove_dir_all(baseline_dir) {
            eprintln!("failed to remove target/criterion: {err}");
            exit(1);
        }
    }

    step("Stashing current changes");
    run_git(&[
        "stash",
        "push",
        "-m",
        "Temporary stash for benchmark comparison",
    ]);

    step("Running benchmark to create baseline");
    run_cargo(&[
        "bench",
        "--package",
        "sim_core",
        "--bench",
        "performance",
        "--",
        "--save-baseline",
        "main",
    ]);

    step("Reapplying changes");
    run_git(&["stash", "pop"]);

    step("Running benchmark comparing against baseline");
    run_cargo(&[
        "bench",
        "--package",
        "sim_core",
        "--bench",
        "performance",
        "--",
        "--baseline",
        "main",
    ]);

    eprintln!("\nDone! Check the output above to see performance comparison.");
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_cargo(&[
                "run",
                "-p",
                "sim_core",
                "--example",
                "scenario_run",
                "--release",
            ]);
        }
        Commands::Sweep { preset, out_dir } => run_sweep(preset, &out_dir),
        Commands::Bench => ci_bench(),
        Commands::BenchCompare => bench_compare(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "sim_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
