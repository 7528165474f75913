use newton::{find_root, FractalConfig};
use std::io::Result;
use std::sync::Arc;

use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

mod fig_compiler;
mod fig_writer;
mod figures;
mod utils;

use crate::figures::{build_figure, ALL_FIGURES};
use crate::utils::{error, Settings};

fn solve_demo() {
    let f = |x: f64| x.powi(5) - 5.0 * x + 3.0;
    let df = |x: f64| 5.0 * x.powi(4) - 5.0;

    match find_root(f, df, 2.0, 1.0e-6, 20) {
        Ok(root) => println!("x^5 - 5x + 3 = 0 at x = {root}"),
        Err(e) => println!("x^5 - 5x + 3: {e}"),
    }
}

fn load_configs(settings: &Settings) -> Result<Vec<FractalConfig>> {
    let mut configs = if settings.config.is_empty() {
        ALL_FIGURES.iter().map(|f| f()).collect::<Vec<_>>()
    } else {
        settings
            .config
            .iter()
            .map(|path| {
                let input = std::fs::read_to_string(path)?;
                FractalConfig::decode(&input)
                    .ok_or_else(|| error(&format!("Could not decode fractal config {path}")))
            })
            .collect::<Result<Vec<_>>>()?
    };

    for config in configs.iter_mut() {
        if let Some(resolution) = settings.resolution {
            config.settings.resolution = resolution;
        }
        config
            .validate()
            .map_err(|e| error(&format!("[{}]: {e}", config.name)))?;
    }

    Ok(configs)
}

fn main() -> std::io::Result<()> {
    let settings = Settings::parse();

    if settings.verbose > 0 {
        tracing_subscriber::fmt::fmt()
            .with_writer(std::io::stderr)
            .init();
        log::set_max_level(log::LevelFilter::Debug);
    }

    if settings.solve {
        solve_demo();
        return Ok(());
    }

    let configs = load_configs(&settings)?;
    std::fs::create_dir_all(&settings.output_dir)?;

    let num_threads = if let Some(jobs) = settings.jobs {
        jobs
    } else {
        num_cpus::get()
    }
    .clamp(1, configs.len().max(1));

    let spinner_style = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )
    .map_err(|e| error(&e.to_string()))?;

    if settings.verbose == 0 {
        println!("[1/2] Building {} figures", configs.len());
    }

    let mb = Arc::new(MultiProgress::new());
    let pool = threadpool::ThreadPool::new(num_threads);
    let (tx, rx) = std::sync::mpsc::channel();

    let pb = if settings.verbose == 0 {
        mb.add(ProgressBar::new_spinner())
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(spinner_style.clone());
    pb.set_message("Building figures");
    pb.set_length(configs.len() as u64);
    pb.enable_steady_tick(std::time::Duration::from_millis(250));

    let figure_count = configs.len();
    for (i, config) in configs.into_iter().enumerate() {
        let spinner_style = spinner_style.clone();
        let settings = settings.clone();
        let mb = mb.clone();
        let tx = tx.clone();
        pool.execute(move || {
            let pb = if settings.verbose == 0 {
                mb.add(ProgressBar::new(1))
            } else {
                ProgressBar::hidden()
            };
            pb.set_style(spinner_style);
            let result = build_figure(&config, &settings, &pb).and_then(|(figure, stats)| {
                let finished = figure.wait(&pb, &settings)?;
                Ok((i, finished, stats))
            });
            pb.finish_and_clear();
            // The receiver only goes away once every result is in
            let _ = tx.send(result);
        });
    }

    let mut finished_figures = rx
        .into_iter()
        .take(figure_count)
        .map(|r| {
            pb.inc(1);
            r
        })
        .collect::<Result<Vec<_>>>()?;
    pool.join();
    pb.finish_and_clear();

    finished_figures.sort_by_key(|&(n, _, _)| n);

    if settings.verbose == 0 {
        println!("[2/2] Summary");
    }
    let mut failed = 0;
    for (_, figure, stats) in finished_figures {
        let status = if figure.compiled {
            "pdf"
        } else if settings.no_compile {
            "tex"
        } else {
            failed += 1;
            "failed"
        };
        println!("{:>20} [{status:>6}]: {stats}", figure.name);
    }

    if failed > 0 {
        return Err(error(&format!("Lualatex failed on {failed} figures")));
    }

    Ok(())
}
