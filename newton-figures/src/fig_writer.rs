use newton::{Domain, Fractal};
use num::complex::Complex64;
use std::fs::File;
use std::io::{prelude::*, BufWriter, Result};
use std::path::PathBuf;

use crate::fig_compiler::FigureCompiler;
use crate::utils::{Settings, Size, PROGRESS_EXT, TEX_EXT};

/// Fully saturated color for hue `h` in `[0, 1)`.
fn hue_to_rgb(h: f64) -> (f64, f64, f64) {
    let h = 6.0 * h.rem_euclid(1.0);
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    }
}

/// `colormap access=direct` palette: black for points that did not
/// converge, then one hue per root.
fn colormap(root_count: usize) -> String {
    let mut colors = vec!["rgb=(0,0,0)".to_owned()];
    for k in 0..root_count {
        let (r, g, b) = hue_to_rgb(k as f64 / root_count as f64);
        colors.push(format!("rgb=({r:.3},{g:.3},{b:.3})"));
    }
    format!("colormap={{newton}}{{{}}}", colors.join(" "))
}

#[derive(Debug)]
pub struct FigureWriter {
    pub name: String,
    pub domain: Domain,
    writer: BufWriter<File>,
    pub plot_count: u64,
}

impl FigureWriter {
    const FILE_START_1: &str = r#"
\nonstopmode
\documentclass[10pt,a4paper]{article}
\usepackage{luatextra}
\begin{luacode}
progress_file=io.open(""#;
    const FILE_START_2: &str = r#"","w")
\end{luacode}
\usepackage{pgfplots}
\pgfplotsset{compat=1.17}
\usepackage[active,tightpage]{preview}
\PreviewEnvironment{tikzpicture}
\setlength\PreviewBorder{0pt}
\pdfvariable suppressoptionalinfo \numexpr 1023 \relax
\begin{document}
\pagestyle{empty}
\begin{tikzpicture}
"#;

    const FILE_END: &str = r#"
\end{tikzpicture}
\directlua{progress_file:write("!")}
\directlua{io.close(progress_file)}
\end{document}
"#;

    pub fn new(
        name: &str,
        domain: Domain,
        width: f64,
        root_count: usize,
        settings: &Settings,
    ) -> Result<Self> {
        let mut path = PathBuf::from(&settings.output_dir).join(name);
        path.set_extension(TEX_EXT);

        log::info!("[{name}]: Creating file {}", path.to_string_lossy());

        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        let mut progress_path = path.clone();
        progress_path.set_extension(PROGRESS_EXT);
        writer.write_all(Self::FILE_START_1.as_bytes())?;
        write!(writer, "{}", progress_path.to_string_lossy())?;
        writer.write_all(Self::FILE_START_2.as_bytes())?;

        let _ = std::fs::remove_file(progress_path);

        let size = Size {
            width,
            height: width * domain.height() / domain.width(),
        };

        let Domain {
            x_min,
            x_max,
            y_min,
            y_max,
        } = domain;
        let Size { width, height } = size;
        let colormap = colormap(root_count);

        writeln!(writer, "\\begin{{axis}}[hide axis,scale only axis,ticks=none,xmin={x_min},xmax={x_max},ymin={y_min},ymax={y_max},clip,width={width}cm,height={height}cm,{colormap},colormap access=direct]")?;

        Ok(Self {
            name: name.to_owned(),
            domain,
            writer,
            plot_count: 0,
        })
    }

    fn format_coordinate(&self, z: Complex64) -> String {
        format!("({:.5},{:.5})", z.re, z.im)
    }

    fn inside(&self, z: &Complex64) -> bool {
        (self.domain.x_min..=self.domain.x_max).contains(&z.re)
            && (self.domain.y_min..=self.domain.y_max).contains(&z.im)
    }

    fn progress(&mut self) -> Result<()> {
        writeln!(self.writer, r#"\directlua{{progress_file:write(".")}}"#)?;
        writeln!(self.writer, r#"\directlua{{progress_file:flush()}}"#)?;
        self.plot_count += 1;
        Ok(())
    }

    /// Draws the index grid as one colored cell per starting point. Row 0
    /// (`y_min`) ends up at the bottom of the picture.
    pub fn add_basins(&mut self, fractal: &Fractal) -> Result<()> {
        let n = fractal.grid.size();
        if n < 2 {
            log::warn!("[{}]: Grid too small to draw", self.name);
            return Ok(());
        }

        writeln!(
            self.writer,
            "\\addplot [matrix plot*,mesh/cols={n},mesh/rows={n},point meta=explicit] table [meta=c] {{"
        )?;
        writeln!(self.writer, "x y c")?;

        let xs = fractal.settings.domain.xs(n).collect::<Vec<_>>();
        let ys = fractal.settings.domain.ys(n);
        for (y, row) in ys.zip(fractal.grid.rows()) {
            for (x, cell) in xs.iter().zip(row) {
                let meta = cell.map_or(0, |index| index + 1);
                writeln!(self.writer, "{x:.6} {y:.6} {meta}")?;
            }
        }
        writeln!(self.writer, "}};")?;
        self.progress()
    }

    /// Marks the roots that lie inside the plotted domain.
    pub fn add_roots(&mut self, roots: &[Complex64], options: &[&str]) -> Result<()> {
        let coordinates = roots
            .iter()
            .filter(|z| self.inside(z))
            .map(|&z| self.format_coordinate(z))
            .collect::<Vec<_>>();

        if !coordinates.is_empty() {
            writeln!(
                self.writer,
                "\\addplot [{}] coordinates {{ {} }};",
                [&["only marks", "mark size=0.05cm"], options]
                    .concat()
                    .join(","),
                coordinates.join(" ")
            )?;
            self.progress()?;
        }
        Ok(())
    }

    pub fn finish(mut self, settings: &Settings) -> Result<FigureCompiler> {
        writeln!(self.writer, "\\end{{axis}}\n")?;
        self.writer.write_all(Self::FILE_END.as_bytes())?;
        self.writer.flush()?;

        FigureCompiler::new(self, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hue_to_rgb(0.0), (1.0, 0.0, 0.0));
        assert_eq!(hue_to_rgb(0.25), (0.5, 1.0, 0.0));
        assert_eq!(hue_to_rgb(0.5), (0.0, 1.0, 1.0));
        assert_eq!(hue_to_rgb(1.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn colormap_starts_with_black() {
        let map = colormap(2);
        assert_eq!(
            map,
            "colormap={newton}{rgb=(0,0,0) rgb=(1.000,0.000,0.000) rgb=(0.000,1.000,1.000)}"
        );
    }
}
