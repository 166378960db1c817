//! Matchday turns a handball club's iCalendar fixture feed into ready-to-publish
//! social-media posts.
//!
//! # Pipeline overview
//!
//! 1. **Read**: the `.ics` feed becomes [`CalendarEvent`]s.
//! 2. **Extract**: titles involving the tracked team become [`Match`] records, grouped by
//!    date ([`DateMatches`]).
//! 3. **Plan**: each date's matches are classified into dedicated and generic
//!    [`RenderJob`]s with their label -> text [`ReplacementSet`]s.
//! 4. **Fill**: every job loads its labelled SVG template ([`TemplateDocument`]), substitutes
//!    texts, recolors team names and embeds club logos.
//! 5. **Rasterize** (optional): PNG companions through an external [`Rasterizer`]
//!    (Inkscape by default).
//!
//! Failures are scoped ([`ErrorScope`]): a bad job or date is reported in the
//! [`RunReport`] and skipped, only run-wide failures abort.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod calendar;
mod document;
mod foundation;
mod normalize;
mod plan;
mod render;

pub use calendar::extract::{Match, TitleParts, extract_match, split_title};
pub use calendar::feed::{CalendarEvent, parse_feed, parse_start, read_feed};
pub use calendar::group::{DateMatches, group_by_date, group_feed};
pub use document::logo::{Logo, LogoCatalog, embed_logos, fit_logo, logo_slots};
pub use document::substitute::{TeamColors, recolor_fill, substitute};
pub use document::tree::{
    Attribute, Element, INKSCAPE_NS, NamespaceDecl, Node, NodeRole, QName, SVG_NS,
    TemplateDocument, XLINK_NS,
};
pub use foundation::config::{
    Config, DedicatedLevel, GenericTemplates, PathsConfig, TrackedTeam,
};
pub use foundation::error::{ErrorScope, PostError, PostResult};
pub use normalize::names::Normalizer;
pub use plan::planner::{DatePlan, Planner, RenderJob, dedicated_replacements, format_post_date};
pub use plan::replacements::{DATE_KEY, ReplacementSet, SlotField, slot_key};
pub use render::pipeline::{
    Generator, OutputLayout, RunOptions, RunReport, Skipped, output_stem,
};
pub use render::rasterize::{DEFAULT_TIMEOUT, DEFAULT_WIDTH_PX, Rasterizer, ensure_parent_dir};
