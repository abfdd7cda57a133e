//! Gait diagram rendering.
//!
//! Draws one horizontal lane per channel, first channel on top, with a
//! filled bar for every contact interval. The x axis spans the extraction
//! window in time steps.

use crate::channels::{GaitError, Result};
use crate::contact::GaitContacts;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Native output format of the renderer.
pub const SVG_EXTENSION: &str = "svg";

const DEFAULT_WIDTH: u32 = 1024;
const LANE_HEIGHT: u32 = 48;
const CHROME_HEIGHT: u32 = 120;
const LABEL_AREA: u32 = 120;
const BAR_COLOR: RGBColor = RGBColor(40, 40, 40);
const FONT: &str = "sans-serif";

/// Display options for a gait diagram.
#[derive(Debug, Clone)]
pub struct GaitDiagram {
    pub title: Option<String>,
    pub grid: bool,
    pub width: u32,
}

impl Default for GaitDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl GaitDiagram {
    pub fn new() -> Self {
        Self {
            title: None,
            grid: false,
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the diagram title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Toggle grid lines.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Canvas size for the given number of channels.
    pub fn size(&self, channels: usize) -> (u32, u32) {
        let lanes = channels.max(1) as u32;
        (self.width, CHROME_HEIGHT + lanes * LANE_HEIGHT)
    }

    /// Render the diagram as SVG, returning the path actually written.
    pub fn render<P: AsRef<Path>>(&self, contacts: &GaitContacts, path: P) -> Result<PathBuf> {
        let path = normalize_svg_path(path.as_ref());
        let size = self.size(contacts.channels.len());
        debug!(
            "rendering {} lanes to {} ({}x{})",
            contacts.channels.len(),
            path.display(),
            size.0,
            size.1
        );

        let root = SVGBackend::new(&path, size).into_drawing_area();
        self.draw(root, contacts)
            .map_err(|e| GaitError::Render(e.to_string()))?;

        Ok(path)
    }

    fn draw(
        &self,
        root: DrawingArea<SVGBackend<'_>, Shift>,
        contacts: &GaitContacts,
    ) -> std::result::Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;

        let lanes = contacts.channels.len().max(1);
        let window = contacts.window;
        // Keep the axis non-degenerate for empty windows
        let x_end = if window.is_empty() {
            window.start + 1
        } else {
            window.end
        };

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(LABEL_AREA);
        if let Some(title) = &self.title {
            builder.caption(title, (FONT, 22));
        }
        let mut chart =
            builder.build_cartesian_2d(window.start as f64..x_end as f64, 0.0..lanes as f64)?;

        let step_label = |v: &f64| format!("{:.0}", v);
        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .disable_y_axis()
            .x_desc("time step")
            .x_label_formatter(&step_label);
        if !self.grid {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;

        // Lane i (declaration order) occupies [lanes - i - 1, lanes - i)
        for (i, channel) in contacts.channels.iter().enumerate() {
            let lower = (lanes - i - 1) as f64 + 0.15;
            let upper = (lanes - i) as f64 - 0.15;

            chart.draw_series(channel.intervals.iter().map(|interval| {
                Rectangle::new(
                    [
                        (interval.start as f64, lower),
                        (interval.end() as f64, upper),
                    ],
                    BAR_COLOR.filled(),
                )
            }))?;

            let (_, y) = chart.backend_coord(&(window.start as f64, (lower + upper) / 2.0));
            root.draw(&Text::new(
                channel.name.as_str(),
                (16, y - 7),
                (FONT, 14).into_font(),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

/// Give the output path the `.svg` extension if it has none.
pub fn normalize_svg_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        None => path.with_extension(SVG_EXTENSION),
        Some(ext) if ext.eq_ignore_ascii_case(SVG_EXTENSION) => path.to_path_buf(),
        Some(ext) => {
            warn!(
                "output {} has extension '{}', writing SVG anyway",
                path.display(),
                ext
            );
            path.to_path_buf()
        }
    }
}
