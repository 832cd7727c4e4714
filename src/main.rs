use clap::{Parser, Subcommand};

const EXIT_SUCCESS: i32 = 0;
const EXIT_PROFILE: i32 = 1;
const EXIT_CALC: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the mGRADE of a saved profile and print it
    Calc {
        /// Profile file name (.json appended if missing)
        profile: String,

        /// Also print the intermediate quantities
        #[arg(short, long)]
        breakdown: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "mgrade")]
#[command(about = "Composite athletic performance score calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Decimal digits in the rounded grade
    #[arg(short, long, global = true, default_value_t = mgrade::grading::DEFAULT_PRECISION)]
    precision: i32,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand: run the interactive form
            let app = mgrade::tui::App::new(cli.precision);
            if let Err(e) = mgrade::tui::run_tui(app).await {
                eprintln!("TUI error: {e}");
                std::process::exit(EXIT_CALC);
            }
        }
        Some(Commands::Calc { profile, breakdown }) => {
            if cli.verbose {
                eprintln!(
                    "Loading profile from {}",
                    mgrade::profile::resolve_path(&profile).display()
                );
            }

            let record = match mgrade::profile::load_profile(&profile) {
                Ok(record) => record,
                Err(e) => {
                    eprintln!("Error loading profile: {e}");
                    std::process::exit(EXIT_PROFILE);
                }
            };

            let result = match mgrade::grading::compute_grade(&record, cli.precision) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Calculation failed: {e}");
                    std::process::exit(EXIT_CALC);
                }
            };

            let use_colors = mgrade::output::should_use_colors();
            println!(
                "{}",
                mgrade::output::format_grade(&result, cli.precision, use_colors)
            );
            if breakdown {
                println!("{}", mgrade::output::format_breakdown(&result, use_colors));
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
