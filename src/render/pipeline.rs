use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::{
    calendar::{
        feed::read_feed,
        group::{DateMatches, group_by_date},
    },
    document::{
        logo::{LogoCatalog, embed_logos},
        substitute::{TeamColors, substitute},
        tree::TemplateDocument,
    },
    foundation::{
        config::Config,
        error::{ErrorScope, PostError, PostResult},
    },
    normalize::names::Normalizer,
    plan::planner::{Planner, RenderJob},
    render::rasterize::Rasterizer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where templates are read from and outputs are written to.
pub struct OutputLayout {
    /// Directory of `<template>.svg` files.
    pub templates: PathBuf,
    /// Directory receiving filled SVGs.
    pub svg: PathBuf,
    /// Directory receiving PNGs.
    pub png: PathBuf,
}

impl OutputLayout {
    /// Templates from `templates`, outputs under `<output_root>/svg` and `<output_root>/png`.
    pub fn new(templates: impl Into<PathBuf>, output_root: impl AsRef<Path>) -> Self {
        let root = output_root.as_ref();
        Self {
            templates: templates.into(),
            svg: root.join("svg"),
            png: root.join("png"),
        }
    }

    /// Create the output directories.
    pub fn prepare(&self) -> PostResult<()> {
        for dir in [&self.svg, &self.png] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))?;
        }
        Ok(())
    }

    /// Path of the named template.
    pub fn template_path(&self, template: &str) -> PathBuf {
        self.templates.join(format!("{template}.svg"))
    }

    /// Filled SVG path for `(date, template)`.
    pub fn svg_path(&self, date: NaiveDate, template: &str) -> PathBuf {
        self.svg.join(format!("{}.svg", output_stem(date, template)))
    }

    /// PNG path for `(date, template)`.
    pub fn png_path(&self, date: NaiveDate, template: &str) -> PathBuf {
        self.png.join(format!("{}.png", output_stem(date, template)))
    }
}

/// `<ISO date>_<template>`, shared by the SVG and PNG of one job.
pub fn output_stem(date: NaiveDate, template: &str) -> String {
    format!("{}_{template}", date.format("%Y-%m-%d"))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Run-wide switches.
pub struct RunOptions {
    /// Dates before this one are skipped.
    pub since: Option<NaiveDate>,
    /// `None` disables every raster step.
    pub rasterizer: Option<Rasterizer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A date or job that produced no output, with its cause.
pub struct Skipped {
    /// Fixture date.
    pub date: NaiveDate,
    /// Template of the skipped job; `None` when the whole date or generic pair was dropped.
    pub template: Option<String>,
    /// Rendered error.
    pub cause: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// What a run produced.
pub struct RunReport {
    /// Filled SVG files.
    pub written: Vec<PathBuf>,
    /// PNG files.
    pub rasterized: Vec<PathBuf>,
    /// Dates and jobs skipped after a scoped error.
    pub skipped: Vec<Skipped>,
}

impl RunReport {
    /// `true` when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, date: NaiveDate, template: Option<&str>, err: &PostError) {
        tracing::warn!(%date, template = template.unwrap_or("-"), "skipped: {err}");
        self.skipped.push(Skipped {
            date,
            template: template.map(str::to_string),
            cause: err.to_string(),
        });
    }
}

/// Drives planning, substitution, logo embedding and rasterization.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
    config: &'a Config,
    catalog: &'a LogoCatalog,
    layout: &'a OutputLayout,
    options: &'a RunOptions,
}

impl<'a> Generator<'a> {
    /// Generator over shared, read-only tables.
    pub fn new(
        config: &'a Config,
        catalog: &'a LogoCatalog,
        layout: &'a OutputLayout,
        options: &'a RunOptions,
    ) -> Self {
        Self {
            config,
            catalog,
            layout,
            options,
        }
    }

    /// Read a calendar file and render every post it implies.
    #[tracing::instrument(skip(self))]
    pub fn run_calendar(&self, calendar: &Path) -> PostResult<RunReport> {
        let events = read_feed(calendar)?;
        let normalizer = Normalizer::new(self.config);
        let dates = group_by_date(&events, &self.config.tracked_team.feed_name, &normalizer);
        tracing::info!(
            events = events.len(),
            dates = dates.len(),
            "calendar loaded"
        );
        self.generate(&dates)
    }

    /// Render every date in ascending order.
    ///
    /// Date- and job-scoped errors are reported and skipped; only run-scoped ones return
    /// `Err`. Outputs of dates already rendered stay on disk either way.
    #[tracing::instrument(skip_all, fields(dates = dates.len()))]
    pub fn generate(&self, dates: &DateMatches) -> PostResult<RunReport> {
        self.layout.prepare()?;
        let planner = Planner::new(self.config);
        let mut report = RunReport::default();

        for (&date, matches) in dates {
            if let Some(since) = self.options.since
                && date < since
            {
                tracing::info!(%date, "skipping date before {since}");
                continue;
            }

            let plan = match planner.plan_date(date, matches) {
                Ok(plan) => plan,
                Err(e) if e.scope() == ErrorScope::Run => return Err(e),
                Err(e) => {
                    report.skip(date, None, &e);
                    continue;
                }
            };
            for e in &plan.skipped {
                report.skip(date, None, e);
            }
            for job in &plan.jobs {
                self.run_job(date, job, &mut report)?;
            }
        }

        tracing::info!(
            written = report.written.len(),
            rasterized = report.rasterized.len(),
            skipped = report.skipped.len(),
            "run finished"
        );
        Ok(report)
    }

    fn run_job(&self, date: NaiveDate, job: &RenderJob, report: &mut RunReport) -> PostResult<()> {
        let svg = match self.render_job(date, job) {
            Ok(svg) => svg,
            Err(e) if e.scope() == ErrorScope::Run => return Err(e),
            Err(e) => {
                report.skip(date, Some(&job.template), &e);
                return Ok(());
            }
        };
        tracing::info!(svg = %svg.display(), "wrote");
        report.written.push(svg.clone());

        let Some(rasterizer) = self.options.rasterizer.as_ref().filter(|_| job.rasterize) else {
            return Ok(());
        };
        let png = self.layout.png_path(date, &job.template);
        match rasterizer.rasterize(&svg, &png) {
            Ok(()) => {
                tracing::info!(png = %png.display(), "wrote");
                report.rasterized.push(png);
            }
            Err(e) => report.skip(date, Some(&job.template), &e),
        }
        Ok(())
    }

    /// Fill one template and write its SVG; returns the SVG path.
    ///
    /// Substitution consumes a copy of the replacements; logo embedding reads the
    /// untouched original so it can still see every team name.
    pub fn render_job(&self, date: NaiveDate, job: &RenderJob) -> PostResult<PathBuf> {
        let mut doc = TemplateDocument::load(self.layout.template_path(&job.template))?;

        let mut pending = job.replacements.clone();
        let colors = TeamColors::from_team(&self.config.tracked_team);
        substitute(&mut doc.root, &mut pending, &colors);
        if !pending.is_empty() {
            tracing::debug!(
                template = %job.template,
                unused = ?pending.keys().collect::<Vec<_>>(),
                "template has no slot for some replacements"
            );
        }

        embed_logos(&mut doc.root, &job.replacements, self.catalog)?;

        let out = self.layout.svg_path(date, &job.template);
        doc.save(&out)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
