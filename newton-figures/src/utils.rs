use clap::Parser;

pub const TEX_EXT: &str = "tex";
pub const PDF_EXT: &str = "pdf";
pub const PROGRESS_EXT: &str = "prg";
pub const JSON_EXT: &str = "json";

pub fn error(message: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Per-figure grid statistics for the closing report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    pub roots: usize,
    pub converged: usize,
    pub cells: usize,
}

impl std::fmt::Display for GridStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let percent = if self.cells == 0 {
            0.0
        } else {
            100.0 * self.converged as f64 / self.cells as f64
        };
        write!(
            f,
            "{} roots, {}/{} points converged ({percent:.1}%)",
            self.roots, self.converged, self.cells
        )
    }
}

#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    #[arg(short, long, default_value = "lualatex")]
    pub lualatex: String,
    #[arg(short, long, default_value = "./figures")]
    pub output_dir: String,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Fractal config files (RON, JSON or compressed) to draw instead of the built-in figures
    #[arg(short, long)]
    pub config: Vec<String>,
    /// Override the grid resolution of every figure
    #[arg(short = 'n', long)]
    pub resolution: Option<usize>,
    /// Only write the .tex files
    #[arg(long)]
    pub no_compile: bool,
    /// Also write each index grid and its roots as JSON
    #[arg(long)]
    pub save_grid: bool,
    /// Run Newton's method on x^5 - 5x + 3 from x = 2 and exit
    #[arg(long)]
    pub solve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags() {
        let settings = Settings::parse_from([
            "newton-figures",
            "-vv",
            "-n",
            "64",
            "--config",
            "a.ron",
            "--config",
            "b.ron",
            "--no-compile",
        ]);
        assert_eq!(settings.verbose, 2);
        assert_eq!(settings.resolution, Some(64));
        assert_eq!(settings.config, vec!["a.ron", "b.ron"]);
        assert!(settings.no_compile);
        assert!(!settings.save_grid);
        assert_eq!(settings.output_dir, "./figures");
    }

    #[test]
    fn stats_report() {
        let stats = GridStats {
            roots: 3,
            converged: 3,
            cells: 4,
        };
        assert_eq!(stats.to_string(), "3 roots, 3/4 points converged (75.0%)");
        assert!(GridStats::default().to_string().ends_with("(0.0%)"));
    }
}
