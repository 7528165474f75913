use std::io::Result;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;

use indicatif::ProgressBar;

use crate::fig_writer::FigureWriter;
use crate::utils::{Settings, PDF_EXT, PROGRESS_EXT, TEX_EXT};

pub struct FigureCompiler {
    pub name: String,
    child: Option<Child>,
    plot_count: u64,
}

#[derive(Debug)]
pub struct FinishedFigure {
    pub name: String,
    pub compiled: bool,
}

impl FigureCompiler {
    pub fn new(figure: FigureWriter, settings: &Settings) -> Result<Self> {
        let FigureWriter {
            name, plot_count, ..
        } = figure;

        if settings.no_compile {
            log::info!("[{name}]: Skipping Lualatex");
            return Ok(Self {
                name,
                child: None,
                plot_count,
            });
        }

        let mut path = PathBuf::from(&settings.output_dir).join(name.clone());
        path.set_extension(TEX_EXT);

        let mut cmd = Command::new(&settings.lualatex);
        cmd.arg(format!("--output-directory={}", settings.output_dir))
            .args(["--interaction=nonstopmode", "--output-format=pdf"])
            .arg(path.as_os_str())
            .stderr(Stdio::null())
            .stdout(Stdio::null());

        log::info!("[{name}]: Running Lualatex");
        let child = cmd.spawn()?;

        Ok(Self {
            name,
            child: Some(child),
            plot_count,
        })
    }

    pub fn wait(self, pb: &ProgressBar, settings: &Settings) -> Result<FinishedFigure> {
        let Some(mut child) = self.child else {
            return Ok(FinishedFigure {
                name: self.name,
                compiled: false,
            });
        };

        pb.set_message(format!("Compiling {}.{TEX_EXT}", self.name));
        pb.set_length(self.plot_count + 1);
        let mut progress_path = PathBuf::from(&settings.output_dir).join(&self.name);
        progress_path.set_extension(PROGRESS_EXT);

        let success = loop {
            pb.tick();
            if let Ok(meta) = progress_path.metadata() {
                pb.set_position(meta.len());
            }

            if let Some(result) = child.try_wait()? {
                if result.success() {
                    log::info!("[{}]: Lualatex done.", self.name);
                } else {
                    log::error!("[{}]: Lualatex failed.", self.name);
                }
                break result.success();
            }
            thread::sleep(std::time::Duration::from_millis(250));
        };
        let _ = std::fs::remove_file(progress_path);

        if success {
            let mut pdf_path = PathBuf::from(&settings.output_dir).join(&self.name);
            pdf_path.set_extension(PDF_EXT);
            log::debug!("[{}]: Wrote {}", self.name, pdf_path.to_string_lossy());
        }

        Ok(FinishedFigure {
            name: self.name,
            compiled: success,
        })
    }
}
