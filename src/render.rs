//! Handing trajectories to a plotting backend.
//!
//! A [`Render`] implementation receives a [`PlotRequest`]: the trajectory,
//! optional legend and title, and the row window `first_t..last_t` to draw.
//! With the `plotting` feature, [`SvgPlotter`] draws the request as one
//! line per compartment into an SVG file.

use bon::Builder;

use crate::{
    Float,
    error::{Error, Result},
    solve::trajectory::Trajectory,
};

/// Something that can display a trajectory.
pub trait Render {
    fn render(&mut self, request: &PlotRequest<'_>) -> Result<()>;
}

/// What to draw.
///
/// `first_t` and `last_t` select rows with slice semantics: negative values
/// count from the end, so the defaults `0` and `-1` leave out the final row.
#[derive(Builder, Debug, Clone)]
pub struct PlotRequest<'a> {
    #[builder(start_fn)]
    pub trajectory: &'a Trajectory,
    /// One label per compartment.
    pub legend: Option<Vec<String>>,
    #[builder(into)]
    pub title: Option<String>,
    #[builder(default = 0)]
    pub first_t: isize,
    #[builder(default = -1)]
    pub last_t: isize,
}

impl PlotRequest<'_> {
    /// Checks the legend against the trajectory width.
    pub fn validate(&self) -> Result<()> {
        if let Some(legend) = &self.legend {
            let width = self.trajectory.width();
            if legend.len() != width {
                return Err(Error::ShapeMismatch {
                    what: "legend",
                    expected: width,
                    got: legend.len(),
                });
            }
        }
        Ok(())
    }

    /// Rows inside the requested window.
    pub fn rows(&self) -> &[Vec<Float>] {
        &self.trajectory.y[self.trajectory.window(self.first_t, self.last_t)]
    }
}

#[cfg(feature = "plotting")]
pub use svg::SvgPlotter;

#[cfg(feature = "plotting")]
mod svg {
    use std::path::PathBuf;

    use plotters::prelude::*;

    use super::{PlotRequest, Render};
    use crate::{
        Float,
        error::{Error, Result},
    };

    /// Writes one SVG line chart per request, compartment values against
    /// row index within the window.
    #[derive(Debug, Clone)]
    pub struct SvgPlotter {
        path: PathBuf,
        size: (u32, u32),
    }

    impl SvgPlotter {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                size: (1200, 800),
            }
        }

        pub fn with_size(mut self, width: u32, height: u32) -> Self {
            self.size = (width, height);
            self
        }
    }

    fn render_err(e: impl std::fmt::Display) -> Error {
        Error::Render(e.to_string())
    }

    impl Render for SvgPlotter {
        fn render(&mut self, request: &PlotRequest<'_>) -> Result<()> {
            request.validate()?;
            let rows = request.rows();
            if rows.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "window {}..{} selects no rows",
                    request.first_t, request.last_t
                )));
            }

            let (mut y_min, mut y_max) = rows
                .iter()
                .flatten()
                .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            if y_max - y_min <= Float::EPSILON {
                y_min -= 0.5;
                y_max += 0.5;
            }
            let y_margin = (y_max - y_min) * 0.05;
            let x_max = (rows.len() - 1).max(1) as Float;

            let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let mut builder = ChartBuilder::on(&root);
            builder.margin(20).x_label_area_size(40).y_label_area_size(60);
            if let Some(title) = &request.title {
                builder.caption(title, ("sans-serif", 30));
            }
            let mut chart = builder
                .build_cartesian_2d(0.0..x_max, (y_min - y_margin)..(y_max + y_margin))
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc("Time")
                .draw()
                .map_err(render_err)?;

            for col in 0..request.trajectory.width() {
                let color = Palette99::pick(col).to_rgba();
                let series = chart
                    .draw_series(LineSeries::new(
                        rows.iter()
                            .enumerate()
                            .map(|(i, row)| (i as Float, row[col])),
                        color.stroke_width(2),
                    ))
                    .map_err(render_err)?;
                if let Some(legend) = &request.legend {
                    series.label(legend[col].as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }

            if request.legend.is_some() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
            log::debug!("rendered {} rows to {}", rows.len(), self.path.display());
            Ok(())
        }
    }
}
