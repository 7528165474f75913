use crate::fig_compiler::FigureCompiler;
use crate::fig_writer::FigureWriter;
use crate::utils::{error, GridStats, Settings, JSON_EXT};

use indicatif::ProgressBar;
use newton::{Domain, FractalConfig, FractalSettings, Polynomial};
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::PathBuf;

const FIGURE_WIDTH: f64 = 10.0;

fn fig_quadratic() -> FractalConfig {
    FractalConfig::new(
        "newton-quadratic",
        Polynomial::roots_of_unity(2),
        FractalSettings::new(200, Domain::new(-2.0, 2.0, -2.0, 2.0)),
    )
}

fn fig_cubic() -> FractalConfig {
    FractalConfig::new(
        "newton-cubic",
        Polynomial::roots_of_unity(3),
        FractalSettings::new(400, Domain::new(-2.0, 2.0, -2.0, 2.0)),
    )
}

fn fig_quartic() -> FractalConfig {
    FractalConfig::new(
        "newton-quartic",
        Polynomial::roots_of_unity(4),
        FractalSettings::new(400, Domain::new(-1.5, 1.5, -1.5, 1.5)),
    )
}

fn fig_quintic() -> FractalConfig {
    FractalConfig::new(
        "newton-quintic",
        Polynomial::from_real(&[1.0, 0.0, 0.0, 1.0, -1.0, 1.0]),
        FractalSettings::new(500, Domain::default()),
    )
}

type FigureFunction = fn() -> FractalConfig;

pub const ALL_FIGURES: &[FigureFunction] = &[fig_quadratic, fig_cubic, fig_quartic, fig_quintic];

/// Computes the basins of `config` and writes them out as a `.tex` figure,
/// returning the running (or skipped) Lualatex job.
pub fn build_figure(
    config: &FractalConfig,
    settings: &Settings,
    pb: &ProgressBar,
) -> Result<(FigureCompiler, GridStats)> {
    let name = &config.name;
    log::debug!(
        "[{name}]: {}",
        config.encode_compressed().unwrap_or_default()
    );

    let mut fractal = config
        .fractal()
        .map_err(|e| error(&format!("[{name}]: {e}")))?;

    pb.set_message(format!("Solving {name}"));
    loop {
        let (done, total) = fractal.progress();
        pb.set_length(total as u64);
        pb.set_position(done as u64);
        if fractal.update(&config.polynomial) {
            break;
        }
    }

    let stats = GridStats {
        roots: fractal.roots.len(),
        converged: fractal.grid.converged_count(),
        cells: fractal.grid.len(),
    };

    if settings.save_grid {
        let mut path = PathBuf::from(&settings.output_dir).join(name);
        path.set_extension(JSON_EXT);
        log::info!("[{name}]: Saving grid to {}", path.to_string_lossy());

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &fractal)?;
        writer.flush()?;
    }

    pb.set_message(format!("Writing {name}"));
    log::info!("[{name}]: Drawing basins of {}", config.polynomial);
    let mut figure = FigureWriter::new(
        name,
        fractal.settings.domain,
        FIGURE_WIDTH,
        fractal.roots.len(),
        settings,
    )?;

    figure.add_basins(&fractal)?;
    figure.add_roots(fractal.roots.roots(), &["white", "mark=*"])?;

    Ok((figure.finish(settings)?, stats))
}
